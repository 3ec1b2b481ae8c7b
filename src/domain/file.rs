// src/domain/file.rs
use serde::{Deserialize, Serialize};

/// Category tag the server assigns to an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Pdf,
    #[default]
    #[serde(other)]
    Other,
}

impl FileKind {
    /// Material icon name used on file cards
    pub fn icon_name(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video_library",
            FileKind::Audio => "audio_file",
            FileKind::Document => "description",
            FileKind::Archive => "folder_zip",
            FileKind::Pdf => "picture_as_pdf",
            FileKind::Other => "insert_drive_file",
        }
    }

    pub fn is_previewable(self) -> bool {
        matches!(self, FileKind::Image | FileKind::Video)
    }

    pub fn preview_label(self) -> Option<&'static str> {
        match self {
            FileKind::Video => Some("Play"),
            FileKind::Image => Some("Preview"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Archive => "archive",
            FileKind::Pdf => "pdf",
            FileKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    /// Server-side name, used in download paths
    pub filename: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub kind: FileKind,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl StoredFile {
    pub fn display_name(&self) -> &str {
        if self.original_filename.is_empty() {
            &self.filename
        } else {
            &self.original_filename
        }
    }

    pub fn download_path(&self) -> String {
        format!("/files/download/{}", self.filename)
    }
}

/// Echo of a successful upload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_type: FileKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(FileKind::Image, "image")]
    #[case(FileKind::Video, "video_library")]
    #[case(FileKind::Audio, "audio_file")]
    #[case(FileKind::Document, "description")]
    #[case(FileKind::Archive, "folder_zip")]
    #[case(FileKind::Pdf, "picture_as_pdf")]
    #[case(FileKind::Other, "insert_drive_file")]
    fn test_icon_by_kind(#[case] kind: FileKind, #[case] icon: &str) {
        assert_eq!(kind.icon_name(), icon);
    }

    #[test]
    fn given_unknown_type_when_decoding_file_then_falls_back_to_other() {
        let file: StoredFile = serde_json::from_value(json!({
            "id": 7,
            "filename": "abc.xyz",
            "original_filename": "thing.xyz",
            "size": 10,
            "type": "hologram"
        }))
        .unwrap();

        assert_eq!(file.kind, FileKind::Other);
        assert_eq!(file.display_name(), "thing.xyz");
        assert_eq!(file.download_path(), "/files/download/abc.xyz");
    }

    #[test]
    fn given_media_kinds_when_checking_preview_then_only_image_and_video_qualify() {
        assert!(FileKind::Image.is_previewable());
        assert!(FileKind::Video.is_previewable());
        assert!(!FileKind::Pdf.is_previewable());
        assert_eq!(FileKind::Video.preview_label(), Some("Play"));
        assert_eq!(FileKind::Audio.preview_label(), None);
    }

    #[test]
    fn given_camel_case_upload_echo_when_decoding_then_maps_fields() {
        let receipt: UploadReceipt = serde_json::from_value(json!({
            "url": "http://127.0.0.1:8000/files/download/ab.mp4",
            "filename": "ab.mp4",
            "originalFilename": "clip.mp4",
            "fileSize": 2048,
            "fileType": "video"
        }))
        .unwrap();

        assert_eq!(receipt.original_filename, "clip.mp4");
        assert_eq!(receipt.file_size, 2048);
        assert_eq!(receipt.file_type, FileKind::Video);
    }
}
