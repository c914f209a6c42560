use chrono::NaiveDate;
use serde::Serialize;

/// One discovered document, as it is shown in the index.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub title: String,
    /// `None` when neither the front matter nor the file name carries a date.
    pub date: Option<NaiveDate>,
    /// Relative to the project root, `/` separated.
    pub path: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct CollectedEntries {
    pub case_studies: Vec<Entry>,
    pub tils: Vec<Entry>,
}
