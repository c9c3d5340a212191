use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use lv_core::item::{Item, ItemIndex};

use crate::config::NullConfig;
use crate::DataError;

/// Columns that must be present for the views to work
const REQUIRED_COLUMNS: [&str; 4] = ["price", "area", "bedrooms", "bathrooms"];

/// Loads the housing dataset from CSV.
///
/// Columns are matched by header name, so their order does not matter.
/// Indices are assigned in row order starting at 0.
#[derive(Debug, Clone, Default)]
pub struct HousingCsvSource {
    null_config: NullConfig,
}

/// Position of every known column in the header
#[derive(Debug)]
struct ColumnMap {
    price: usize,
    area: usize,
    bedrooms: usize,
    bathrooms: usize,
    stories: Option<usize>,
    parking: Option<usize>,
    mainroad: Option<usize>,
    guestroom: Option<usize>,
    basement: Option<usize>,
    hotwaterheating: Option<usize>,
    airconditioning: Option<usize>,
    prefarea: Option<usize>,
    furnishingstatus: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

        Ok(Self {
            price: require(REQUIRED_COLUMNS[0])?,
            area: require(REQUIRED_COLUMNS[1])?,
            bedrooms: require(REQUIRED_COLUMNS[2])?,
            bathrooms: require(REQUIRED_COLUMNS[3])?,
            stories: find("stories"),
            parking: find("parking"),
            mainroad: find("mainroad"),
            guestroom: find("guestroom"),
            basement: find("basement"),
            hotwaterheating: find("hotwaterheating"),
            airconditioning: find("airconditioning"),
            prefarea: find("prefarea"),
            furnishingstatus: find("furnishingstatus"),
        })
    }
}

impl HousingCsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_config(null_config: NullConfig) -> Self {
        Self { null_config }
    }

    /// Load every row of the file at `path`
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Item>, DataError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let items = self.load_from_reader(BufReader::new(file))?;
        tracing::info!("Loaded {} items from {}", items.len(), path.display());
        Ok(items)
    }

    /// Load every row readable from `reader`.
    ///
    /// Malformed rows are skipped with a warning and do not consume an index.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<Item>, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

        let mut items = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping CSV row {}: {}", row + 1, e);
                    continue;
                }
            };
            let index = ItemIndex(items.len() as u32);
            items.push(self.parse_row(index, &record, &columns));
        }

        Ok(items)
    }

    fn parse_row(&self, index: ItemIndex, record: &StringRecord, columns: &ColumnMap) -> Item {
        let nulls = &self.null_config;
        let cell = |column: Option<usize>| column.and_then(|i| record.get(i));

        let item = Item {
            index,
            price: nulls.parse_number(record.get(columns.price)),
            area: nulls.parse_number(record.get(columns.area)),
            bedrooms: nulls.parse_integer(record.get(columns.bedrooms)),
            bathrooms: nulls.parse_integer(record.get(columns.bathrooms)),
            stories: nulls.parse_integer(cell(columns.stories)),
            parking: nulls.parse_integer(cell(columns.parking)),
            mainroad: nulls.parse_text(cell(columns.mainroad)),
            guestroom: nulls.parse_text(cell(columns.guestroom)),
            basement: nulls.parse_text(cell(columns.basement)),
            hotwaterheating: nulls.parse_text(cell(columns.hotwaterheating)),
            airconditioning: nulls.parse_text(cell(columns.airconditioning)),
            prefarea: nulls.parse_text(cell(columns.prefarea)),
            furnishingstatus: nulls.parse_text(cell(columns.furnishingstatus)),
        };

        if item.price.is_nan() || item.area.is_nan() {
            tracing::warn!("Item {} has no usable price or area", index);
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUSING: &str = "\
price,area,bedrooms,bathrooms,stories,mainroad,guestroom,basement,hotwaterheating,airconditioning,parking,prefarea,furnishingstatus
13300000,7420,4,2,3,yes,no,no,no,yes,2,yes,furnished
12250000,8960,4,4,4,yes,no,no,no,yes,3,no,furnished
12250000,9960,3,2,2,yes,no,yes,no,no,2,yes,semi-furnished
";

    #[test]
    fn test_load_housing_rows() {
        let items = HousingCsvSource::new().load_from_reader(HOUSING.as_bytes()).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].index, ItemIndex(0));
        assert_eq!(items[2].index, ItemIndex(2));
        assert_eq!(items[0].price, 13_300_000.0);
        assert_eq!(items[1].area, 8960.0);
        assert_eq!(items[1].bathrooms, Some(4));
        assert_eq!(items[2].parking, Some(2));
        assert_eq!(items[2].furnishingstatus.as_deref(), Some("semi-furnished"));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let csv = "bathrooms,area,price,bedrooms\n1,50,100,2\n";
        let items = HousingCsvSource::new().load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(items[0].price, 100.0);
        assert_eq!(items[0].area, 50.0);
        assert_eq!(items[0].bedrooms, Some(2));
        assert_eq!(items[0].bathrooms, Some(1));
        assert_eq!(items[0].stories, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "price,area,bedrooms\n1,2,3\n";
        let result = HousingCsvSource::new().load_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DataError::MissingColumn(name)) if name == "bathrooms"));
    }

    #[test]
    fn test_null_cells() {
        let csv = "price,area,bedrooms,bathrooms,mainroad\nN/A,60,,2,\n200,abc,3\n";
        let items = HousingCsvSource::new().load_from_reader(csv.as_bytes()).unwrap();

        assert!(items[0].price.is_nan());
        assert_eq!(items[0].bedrooms, None);
        assert_eq!(items[0].mainroad, None);
        // Short row: trailing cells read as missing
        assert!(items[1].area.is_nan());
        assert_eq!(items[1].bathrooms, None);
    }

    #[test]
    fn test_missing_file() {
        let result = HousingCsvSource::new().load("does/not/exist.csv");
        assert!(matches!(result, Err(DataError::Io(_))));
    }
}
