//! Simple example of converting a myZeo export into a log file.

use zeo_log::{ConverterConfig, RecordConverter, StdoutProgress};

fn main() -> Result<(), zeo_log::Error> {
    let config = ConverterConfig::new().timezone("US/Eastern");
    let converter = RecordConverter::new(&config)?;

    println!("Converting with timezone {}", converter.timezone());

    let conversion = converter.convert_file("zeodata.csv", "zeo.log", &mut StdoutProgress)?;

    println!("{}", conversion.stats.summary());
    println!("Output written to zeo.log");

    Ok(())
}
