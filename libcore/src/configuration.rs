use crate::error::Error;
use std::fs::File;
use std::io::Read;
extern crate serde_yaml;

/// Tuning of the rewrite engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Number of recent rewrites kept for loop detection.
    pub log_capacity: usize,
    /// Shortest repeating block which counts as a loop.
    pub min_period: usize,
    pub loop_detection: bool,
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            log_capacity: 20,
            min_period: 2,
            loop_detection: true,
        }
    }
}

impl Configuration {
    pub fn load(filename: &str) -> Result<Configuration, Error> {
        let file = File::open(filename)?;
        Configuration::from_reader(file)
    }

    pub fn from_reader<R>(reader: R) -> Result<Configuration, Error>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use stringreader::StringReader;

    #[test]
    fn defaults() {
        let configuration = Configuration::default();
        assert_eq!(configuration.log_capacity, 20);
        assert_eq!(configuration.min_period, 2);
        assert!(configuration.loop_detection);
    }

    #[test]
    fn from_reader_full() {
        let reader = StringReader::new(
            r"
            log-capacity: 8
            min-period: 3
            loop-detection: false
            ",
        );
        let actual = Configuration::from_reader(reader).unwrap();
        let expected = Configuration {
            log_capacity: 8,
            min_period: 3,
            loop_detection: false,
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn from_reader_partial() {
        let reader = StringReader::new("log-capacity: 40");
        let actual = Configuration::from_reader(reader).unwrap();
        assert_eq!(actual.log_capacity, 40);
        assert_eq!(actual.min_period, 2);
    }

    #[test]
    fn from_reader_malformed() {
        let reader = StringReader::new("log-capacity: many");
        match Configuration::from_reader(reader) {
            Err(Error::Yaml(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn load_missing_file() {
        match Configuration::load("does/not/exist.yaml") {
            Err(Error::Io(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
