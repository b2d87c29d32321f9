use crate::data::features::FeatureFields;
use crate::data::records::RecordFormat;
use crate::error::{Error, Result};
use crate::presentation::Formatter;
use num_format::Locale;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Records {
    path: String,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Features {
    path: String,
    district_field: Option<String>,
    url_field: Option<String>,
    party_field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Config {
    description: String,
    district_label: Option<String>,
    locale: Option<String>,
    records: Records,
    features: Option<Features>,
}

fn config_contents(input_file: &Path) -> Result<Config> {
    let buf = fs::read_to_string(input_file)
        .map_err(|e| Error::Config(format!("unable to read {}: {}", input_file.display(), e)))?;
    toml::from_str(&buf)
        .map_err(|e| Error::Config(format!("unable to parse {}: {}", input_file.display(), e)))
}

#[derive(Debug, Clone)]
pub struct FeatureSource {
    pub path: PathBuf,
    pub fields: FeatureFields,
}

// a resolved configuration: paths are relative to the config file
#[derive(Debug, Clone)]
pub struct Work {
    pub description: String,
    pub district_label: String,
    pub locale: Locale,
    pub records: PathBuf,
    pub format: Option<RecordFormat>,
    pub features: Option<FeatureSource>,
}

impl Work {
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.locale, &self.district_label)
    }
}

pub fn read_config(input_file: &Path) -> Result<Work> {
    let config = config_contents(input_file)?;
    let dir = input_file.parent().unwrap_or_else(|| Path::new("."));
    let in_dir = |s: &str| -> PathBuf { dir.join(s) };

    let locale_name = config.locale.as_deref().unwrap_or("en");
    let locale = Locale::from_name(locale_name)
        .map_err(|_| Error::Config(format!("unknown locale: {}", locale_name)))?;
    let format = match &config.records.format {
        Some(name) => Some(RecordFormat::from_name(name).map_err(|e| Error::Config(e.to_string()))?),
        None => None,
    };
    let features = config.features.map(|f| {
        let defaults = FeatureFields::default();
        FeatureSource {
            path: in_dir(&f.path),
            fields: FeatureFields {
                district: f.district_field.unwrap_or(defaults.district),
                url: f.url_field.unwrap_or(defaults.url),
                party: f.party_field.unwrap_or(defaults.party),
            },
        }
    });

    Ok(Work {
        description: config.description,
        district_label: config
            .district_label
            .unwrap_or_else(|| "Senate District".to_string()),
        locale,
        records: in_dir(&config.records.path),
        format,
        features,
    })
}
