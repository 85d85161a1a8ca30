//! Static shelter dataset
//!
//! Loaded once from a CSV file and read-only afterwards. Holds the records in
//! file order along with the column means the feature builder imputes from.

use crate::features::FeatureMeans;
use crate::record::{AnimalRecord, ClusterId};
use crate::schema::{Feature, FEATURE_COUNT};
use crate::vector::FeatureVector;
use crate::{Error, Result};
use ahash::AHashMap;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column layout of the dataset file beyond the feature columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub cluster_column: String,
    pub name_column: String,
    pub photo_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            cluster_column: "cluster_gmm".to_string(),
            name_column: "name".to_string(),
            photo_column: "pictureThumbnailUrl".to_string(),
        }
    }
}

/// In-memory table of animals
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<AnimalRecord>,
    means: FeatureMeans,
}

impl Dataset {
    pub fn new(records: Vec<AnimalRecord>) -> Self {
        let means = FeatureMeans::from_rows(records.iter().map(|r| &r.features));
        Self { records, means }
    }

    /// Load a dataset file. Any failure here is fatal to startup.
    pub fn load<P: AsRef<Path>>(path: P, config: &DatasetConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file, config)?;
        info!(
            "Loaded {} animals in {} clusters from {:?}",
            dataset.len(),
            dataset.clusters().len(),
            path
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader. Text is decoded as UTF-8 when valid and as
    /// Latin-1 otherwise.
    pub fn from_reader<R: Read>(mut reader: R, config: &DatasetConfig) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = decode_text(bytes);

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = rdr.headers()?.clone();
        debug!("Dataset columns: {:?}", headers);
        let layout = ColumnLayout::resolve(&headers, config)?;

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let raw = result?;
            records.push(layout.parse_row(row, &raw)?);
        }

        Ok(Self::new(records))
    }

    #[inline]
    pub fn records(&self) -> &[AnimalRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn means(&self) -> &FeatureMeans {
        &self.means
    }

    /// All records, borrowed in file order
    pub fn all(&self) -> Vec<&AnimalRecord> {
        self.records.iter().collect()
    }

    /// Distinct clusters with their row counts, in first-seen order
    pub fn clusters(&self) -> Vec<(ClusterId, usize)> {
        let mut order: Vec<ClusterId> = Vec::new();
        let mut counts: AHashMap<ClusterId, usize> = AHashMap::new();
        for record in &self.records {
            let count = counts.entry(record.cluster).or_insert(0);
            if *count == 0 {
                order.push(record.cluster);
            }
            *count += 1;
        }
        order
            .into_iter()
            .map(|c| (c, counts.get(&c).copied().unwrap_or(0)))
            .collect()
    }

    /// `first`, then every other cluster present in the dataset in
    /// first-seen order. `first` is kept even when no row carries it.
    pub fn cluster_order(&self, first: ClusterId) -> Vec<ClusterId> {
        std::iter::once(first)
            .chain(self.clusters().into_iter().map(|(c, _)| c).filter(|c| *c != first))
            .collect()
    }
}

/// Column indices of everything we read from a row
struct ColumnLayout {
    features: [usize; FEATURE_COUNT],
    feature_names: [&'static str; FEATURE_COUNT],
    cluster: usize,
    cluster_name: String,
    name: Option<usize>,
    photo: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord, config: &DatasetConfig) -> Result<Self> {
        let position = |column: &str| headers.iter().position(|h| h == column);

        let mut features = [0usize; FEATURE_COUNT];
        for feature in Feature::ALL {
            features[feature.index()] = position(feature.name())
                .ok_or_else(|| Error::MissingColumn(feature.name().to_string()))?;
        }

        let cluster = position(&config.cluster_column)
            .ok_or_else(|| Error::MissingColumn(config.cluster_column.clone()))?;

        Ok(Self {
            features,
            feature_names: Feature::ALL.map(|f| f.name()),
            cluster,
            cluster_name: config.cluster_column.clone(),
            name: position(&config.name_column),
            photo: position(&config.photo_column),
        })
    }

    fn parse_row(&self, row: usize, raw: &StringRecord) -> Result<AnimalRecord> {
        let cell = |idx: usize| raw.get(idx).unwrap_or("");

        let mut values = [0.0f64; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let text = cell(self.features[i]);
            values[i] = parse_number(text).ok_or_else(|| Error::InvalidCell {
                row,
                column: self.feature_names[i].to_string(),
                value: text.to_string(),
            })?;
        }
        let features = FeatureVector::from_fn(|f| values[f.index()]);

        let cluster_text = cell(self.cluster);
        let cluster = parse_cluster(cluster_text).ok_or_else(|| Error::InvalidCell {
            row,
            column: self.cluster_name.clone(),
            value: cluster_text.to_string(),
        })?;

        let mut record = AnimalRecord::new(row, features, cluster);
        record.name = self.name.map(cell).filter(|s| !s.is_empty()).map(str::to_string);
        record.photo_url = self.photo.map(cell).filter(|s| !s.is_empty()).map(str::to_string);
        Ok(record)
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // ISO-8859-1 maps every byte to the code point of the same value
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Numeric cell: empty and NaN markers load as NaN, booleans as 0/1
fn parse_number(text: &str) -> Option<f64> {
    match text {
        "" | "nan" | "NaN" | "NA" | "null" => Some(f64::NAN),
        _ if text.eq_ignore_ascii_case("true") => Some(1.0),
        _ if text.eq_ignore_ascii_case("false") => Some(0.0),
        _ => text.parse::<f64>().ok(),
    }
}

fn parse_cluster(text: &str) -> Option<ClusterId> {
    if let Ok(id) = text.parse::<i64>() {
        return Some(ClusterId(id));
    }
    let value = text.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(ClusterId(value as i64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn header() -> String {
        let mut cols = vec!["name".to_string()];
        cols.extend(Feature::names().into_iter().map(str::to_string));
        cols.push("cluster_gmm".to_string());
        cols.push("pictureThumbnailUrl".to_string());
        cols.join(",")
    }

    fn row(name: &str, fee: &str, cluster: &str, photo: &str) -> String {
        let mut cells = vec![name.to_string(), fee.to_string()];
        cells.extend((1..FEATURE_COUNT).map(|_| "1".to_string()));
        cells.push(cluster.to_string());
        cells.push(photo.to_string());
        cells.join(",")
    }

    fn parse(text: &str) -> Result<Dataset> {
        Dataset::from_reader(text.as_bytes(), &DatasetConfig::default())
    }

    #[test]
    fn test_load_rows_in_order() {
        let csv = format!(
            "{}\n{}\n{}\n{}\n",
            header(),
            row("Luna", "100", "1", "https://example.org/luna.jpg"),
            row("", "", "0", ""),
            row("Max", "300", "1.0", ""),
        );
        let dataset = parse(&csv).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].name.as_deref(), Some("Luna"));
        assert!(dataset.records()[1].name.is_none());
        assert!(dataset.records()[1].photo_url.is_none());
        assert!(dataset.records()[1].feature(Feature::AdoptionFee).is_nan());
        assert_eq!(dataset.records()[2].cluster, ClusterId(1));
        assert_eq!(dataset.means().get(Feature::AdoptionFee), 200.0);
    }

    #[test]
    fn test_cluster_order_is_first_seen() {
        let csv = format!(
            "{}\n{}\n{}\n{}\n{}\n",
            header(),
            row("a", "1", "3", ""),
            row("b", "1", "1", ""),
            row("c", "1", "3", ""),
            row("d", "1", "0", ""),
        );
        let dataset = parse(&csv).unwrap();

        assert_eq!(
            dataset.clusters(),
            vec![(ClusterId(3), 2), (ClusterId(1), 1), (ClusterId(0), 1)]
        );
        assert_eq!(
            dataset.cluster_order(ClusterId(1)),
            vec![ClusterId(1), ClusterId(3), ClusterId(0)]
        );
        assert_eq!(
            dataset.cluster_order(ClusterId(9)),
            vec![ClusterId(9), ClusterId(3), ClusterId(1), ClusterId(0)]
        );
    }

    #[test]
    fn test_cluster_cells() {
        assert_eq!(parse_cluster("3"), Some(ClusterId(3)));
        assert_eq!(parse_cluster("2.0"), Some(ClusterId(2)));
        assert_eq!(parse_cluster("-1"), Some(ClusterId(-1)));
        assert_eq!(parse_cluster("1.5"), None);
        assert_eq!(parse_cluster("1e30"), None);
        assert_eq!(parse_cluster("-1e30"), None);
        assert_eq!(parse_cluster("9223372036854775808.0"), None);
        assert_eq!(parse_cluster("nan"), None);
    }

    #[test]
    fn test_out_of_range_cluster_is_fatal() {
        let csv = format!("{}\n{}\n", header(), row("a", "1", "1e30", ""));
        assert!(matches!(parse(&csv), Err(Error::InvalidCell { .. })));
    }

    #[test]
    fn test_boolean_cells() {
        assert_eq!(parse_number("True"), Some(1.0));
        assert_eq!(parse_number("false"), Some(0.0));
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert!(parse_number("").unwrap().is_nan());
        assert_eq!(parse_number("many"), None);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "name,adoptionFee,cluster_gmm\nLuna,10,0\n";
        assert!(matches!(parse(csv), Err(Error::MissingColumn(c)) if c == "num_breeds"));
    }

    #[test]
    fn test_invalid_cell_is_fatal() {
        let csv = format!("{}\n{}\n", header(), row("Luna", "cheap", "0", ""));
        match parse(&csv) {
            Err(Error::InvalidCell { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "adoptionFee");
                assert_eq!(value, "cheap");
            }
            other => panic!("unexpected: {:?}", other),
        }

        let csv = format!("{}\n{}\n", header(), row("Luna", "1", "0.5", ""));
        assert!(matches!(parse(&csv), Err(Error::InvalidCell { .. })));
    }

    #[test]
    fn test_latin1_names() {
        let mut bytes = header().into_bytes();
        bytes.push(b'\n');
        bytes.extend(b"Pe\xf1a");
        bytes.extend(row("", "1", "0", "").into_bytes());
        bytes.push(b'\n');

        let dataset = Dataset::from_reader(bytes.as_slice(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.records()[0].name.as_deref(), Some("Peña"));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let dataset = parse(&format!("{}\n", header())).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.clusters().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "{}", row("Luna", "10", "2", "")).unwrap();
        file.flush().unwrap();

        let dataset = Dataset::load(file.path(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);

        let missing = Dataset::load("/nonexistent/pets.csv", &DatasetConfig::default());
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
