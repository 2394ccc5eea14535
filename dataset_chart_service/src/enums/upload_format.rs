use crate::common::*;

use crate::utils_modules::io_utils::*;

#[doc = "Table formats accepted on upload, sniffed from the file name extension."]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Json,
}

impl UploadFormat {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_extension(file_name)?.as_str() {
            "csv" => Some(UploadFormat::Csv),
            "json" => Some(UploadFormat::Json),
            _ => None,
        }
    }
}

impl Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFormat::Csv => f.write_str("csv"),
            UploadFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(UploadFormat::from_file_name("sales.CSV"), Some(UploadFormat::Csv));
        assert_eq!(UploadFormat::from_file_name("dump.Json"), Some(UploadFormat::Json));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert_eq!(UploadFormat::from_file_name("notes.txt"), None);
        assert_eq!(UploadFormat::from_file_name("sales.csv.bak"), None);
        assert_eq!(UploadFormat::from_file_name("no_extension"), None);
    }
}
