//! Dataset catalogue: which files to load, with which parser and column mapping.
//!
//! The built-in catalogue describes the StatsWales files shipped in `datasets/`. A different
//! set of files can be described in a JSON catalogue:
//!
//! ```json
//! {
//!   "areas": {"code": "areas", "name": "Areas", "file": "areas.csv",
//!             "parser": "authority-code-csv",
//!             "cols": {"auth_code": "Local authority code",
//!                      "auth_name_eng": "Name (eng)", "auth_name_cym": "Name (cym)"}},
//!   "datasets": []
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IngestionResult;
use crate::ingestion::{ColumnMapping, SourceColumn, SourceDataType};

/// One loadable source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Key used on the command line (`-d popden`).
    pub code: String,
    /// Human-readable description.
    pub name: String,
    /// File name relative to the datasets directory.
    pub file: String,
    /// Source type name, resolved when the file is loaded.
    pub parser: String,
    pub cols: ColumnMapping,
}

impl DatasetSource {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        file: impl Into<String>,
        parser: SourceDataType,
        cols: ColumnMapping,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            file: file.into(),
            parser: parser.as_str().to_string(),
            cols,
        }
    }

    /// Resolve [`DatasetSource::parser`]. Unknown names are
    /// [`crate::IngestionError::UnexpectedDataType`].
    pub fn data_type(&self) -> IngestionResult<SourceDataType> {
        self.parser.parse()
    }
}

/// The areas file plus every dataset that can be requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Loaded first, and always.
    pub areas: DatasetSource,
    /// Optional datasets, in load order.
    #[serde(default)]
    pub datasets: Vec<DatasetSource>,
}

impl Catalogue {
    /// StatsWales datasets with the headers they are published with.
    pub fn builtin() -> Self {
        use SourceColumn::*;

        let areas = DatasetSource::new(
            "areas",
            "Areas",
            "areas.csv",
            SourceDataType::AuthorityCodeCsv,
            ColumnMapping::from_iter([
                (AuthCode, "Local authority code"),
                (AuthNameEng, "Name (eng)"),
                (AuthNameCym, "Name (cym)"),
            ]),
        );

        let by_year = |code: &str, name: &str, file: &str, measure: &str, label: &str| {
            DatasetSource::new(
                code,
                name,
                file,
                SourceDataType::AuthorityByYearCsv,
                ColumnMapping::from_iter([
                    (AuthCode, "AuthorityCode"),
                    (SingleMeasureCode, measure),
                    (SingleMeasureName, label),
                ]),
            )
        };

        let datasets = vec![
            DatasetSource::new(
                "popden",
                "Population density",
                "popu1009.json",
                SourceDataType::WelshStatsJson,
                ColumnMapping::from_iter([
                    (AuthCode, "Localauthority_Code"),
                    (AuthNameEng, "Localauthority_ItemName_ENG"),
                    (MeasureCode, "Measure_Code"),
                    (MeasureName, "Measure_ItemName_ENG"),
                    (Year, "Year_Code"),
                    (Value, "Data"),
                ]),
            ),
            DatasetSource::new(
                "biz",
                "Active Businesses",
                "econ0080.json",
                SourceDataType::WelshStatsJson,
                ColumnMapping::from_iter([
                    (AuthCode, "Area_Code"),
                    (AuthNameEng, "Area_ItemName_ENG"),
                    (MeasureCode, "Variable_Code"),
                    (MeasureName, "Variable_ItemName_ENG"),
                    (Year, "Year_Code"),
                    (Value, "Data"),
                ]),
            ),
            DatasetSource::new(
                "aqi",
                "Air Quality Indicators",
                "envi0201.json",
                SourceDataType::WelshStatsJson,
                ColumnMapping::from_iter([
                    (AuthCode, "Area_Code"),
                    (AuthNameEng, "Area_ItemName_ENG"),
                    (MeasureCode, "Pollutant_ItemName_ENG"),
                    (MeasureName, "Pollutant_ItemName_ENG"),
                    (Year, "Year_Code"),
                    (Value, "Data"),
                ]),
            ),
            DatasetSource::new(
                "trains",
                "Rail passenger journeys",
                "tran0152.json",
                SourceDataType::WelshStatsJson,
                ColumnMapping::from_iter([
                    (AuthCode, "LocalAuthority_Code"),
                    (AuthNameEng, "LocalAuthority_ItemName_ENG"),
                    (SingleMeasureCode, "rail"),
                    (SingleMeasureName, "Rail passenger journeys"),
                    (Year, "Year_Code"),
                    (Value, "Data"),
                ]),
            ),
            by_year(
                "complete-popden",
                "Population density",
                "complete-popu1009-popden.csv",
                "dens",
                "Population density",
            ),
            by_year(
                "complete-pop",
                "Population",
                "complete-popu1009-pop.csv",
                "pop",
                "Population",
            ),
            by_year(
                "complete-area",
                "Land area",
                "complete-popu1009-area.csv",
                "area",
                "Land area",
            ),
        ];

        Self { areas, datasets }
    }

    pub fn from_reader<R: Read>(reader: R) -> IngestionResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> IngestionResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Dataset by its code, case-insensitively.
    pub fn get(&self, code: &str) -> Option<&DatasetSource> {
        self.datasets
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
