// src/infrastructure/http.rs
use crate::application::{FilesApi, ImagesApi, NotesApi, ShareApi, TagsApi};
use crate::domain::{
    DomainError, ImageEntry, Note, NoteDraft, NoteId, NoteQuery, SaveReceipt, StoredFile, Tag,
    TagNotes, UploadReceipt,
};
use crate::infrastructure::payload;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Server health as reported by `/health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
}

/// Blocking REST gateway onto the notes server.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    /// `timeout` of `None` lets requests wait indefinitely
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent(concat!("notedesk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Network(format!("cannot build HTTP client: {e}")))?;
        debug!(%base, ?timeout, "HTTP client ready");
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL for the given path segments; a trailing `""` yields a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    #[instrument(level = "debug", skip(self))]
    pub fn health(&self) -> Result<Health, DomainError> {
        let body = self.json(self.client.get(self.endpoint(&["health"])))?;
        Health::deserialize(&body).map_err(|e| DomainError::Format(e.to_string()))
    }

    fn execute(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .send()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        let status = response.status();
        debug!(url = %response.url(), %status, "Response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = match serde_json::from_str::<Value>(&body) {
            Ok(value) => payload::error_detail(&value),
            Err(_) => body.trim().chars().take(200).collect(),
        };
        Err(DomainError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn json(&self, request: RequestBuilder) -> Result<Value, DomainError> {
        self.execute(request)?
            .json::<Value>()
            .map_err(|e| DomainError::Format(format!("response is not JSON: {e}")))
    }

    fn bytes(&self, request: RequestBuilder) -> Result<Vec<u8>, DomainError> {
        self.execute(request)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| DomainError::Network(e.to_string()))
    }

    fn upload(&self, segments: &[&str], path: &Path) -> Result<Value, DomainError> {
        let form = multipart::Form::new()
            .file("file", path)
            .map_err(DomainError::from)?;
        self.json(self.client.post(self.endpoint(segments)).multipart(form))
    }

    fn save_receipt(body: Value) -> Result<SaveReceipt, DomainError> {
        SaveReceipt::deserialize(&body).map_err(|e| DomainError::Format(e.to_string()))
    }
}

impl NotesApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self, query: &NoteQuery) -> Result<Vec<Note>, DomainError> {
        let request = self
            .client
            .get(self.endpoint(&["notes", "all", ""]))
            .query(&query.params());
        let body = self.json(request)?;
        Ok(payload::decode_items(&body, "notes"))
    }

    #[instrument(level = "debug", skip(self))]
    fn get_note(&mut self, id: NoteId) -> Result<Note, DomainError> {
        let body = self.json(self.client.get(self.endpoint(&["notes", &id.to_string()])))?;
        payload::note_envelope(&body)
    }

    #[instrument(level = "debug", skip(self, draft))]
    fn create_note(&mut self, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["notes", "create", ""]))
            .json(&draft.to_wire());
        Self::save_receipt(self.json(request)?)
    }

    #[instrument(level = "debug", skip(self, draft))]
    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        let request = self
            .client
            .put(self.endpoint(&["notes", &id.to_string()]))
            .json(&draft.to_wire());
        Self::save_receipt(self.json(request)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, id: NoteId) -> Result<String, DomainError> {
        let body = self.json(self.client.delete(self.endpoint(&["notes", &id.to_string()])))?;
        Ok(payload::message(&body))
    }
}

impl ImagesApi for HttpApi {
    fn list_images(&mut self) -> Result<Vec<ImageEntry>, DomainError> {
        let body = self.json(self.client.get(self.endpoint(&["images", "all", ""])))?;
        Ok(payload::image_entries(&body))
    }

    #[instrument(level = "debug", skip(self))]
    fn upload_image(&mut self, path: &Path) -> Result<String, DomainError> {
        let body = self.upload(&["images", "upload", ""], path)?;
        payload::required_str(&body, "url")
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_image(&mut self, filename: &str) -> Result<String, DomainError> {
        let body = self.json(
            self.client
                .delete(self.endpoint(&["images", "delete", filename])),
        )?;
        Ok(payload::message(&body))
    }

    fn get_image(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        self.bytes(self.client.get(self.endpoint(&["images", "get", filename])))
    }
}

impl FilesApi for HttpApi {
    fn list_files(&mut self) -> Result<Vec<StoredFile>, DomainError> {
        let body = self.json(self.client.get(self.endpoint(&["files", "all", ""])))?;
        Ok(payload::decode_items(&body, "files"))
    }

    #[instrument(level = "debug", skip(self))]
    fn upload_file(&mut self, path: &Path) -> Result<UploadReceipt, DomainError> {
        let body = self.upload(&["files", "upload", ""], path)?;
        UploadReceipt::deserialize(&body).map_err(|e| DomainError::Format(e.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_file(&mut self, id: i64) -> Result<String, DomainError> {
        // May answer with an empty body
        let response = self.execute(self.client.delete(self.endpoint(&["files", &id.to_string()])))?;
        let body = response.json::<Value>().unwrap_or(Value::Null);
        Ok(payload::message(&body))
    }

    fn download_file(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        self.bytes(
            self.client
                .get(self.endpoint(&["files", "download", filename])),
        )
    }
}

impl TagsApi for HttpApi {
    fn list_tags(&mut self) -> Result<Vec<Tag>, DomainError> {
        let body = self.json(self.client.get(self.endpoint(&["tags", "all", ""])))?;
        Ok(payload::tags(&body))
    }

    fn search_tags(&mut self, query: &str) -> Result<Vec<Tag>, DomainError> {
        let request = self
            .client
            .get(self.endpoint(&["tags", "search", ""]))
            .query(&[("query", query)]);
        Ok(payload::tags(&self.json(request)?))
    }

    fn rename_tag(&mut self, id: i64, name: &str) -> Result<String, DomainError> {
        let request = self
            .client
            .put(self.endpoint(&["tags", &id.to_string()]))
            .json(&json!({ "name": name }));
        Ok(payload::message(&self.json(request)?))
    }

    fn delete_tag(&mut self, id: i64) -> Result<String, DomainError> {
        let body = self.json(self.client.delete(self.endpoint(&["tags", &id.to_string()])))?;
        Ok(payload::message(&body))
    }

    fn tag_notes(&mut self, id: i64) -> Result<TagNotes, DomainError> {
        let body = self.json(
            self.client
                .get(self.endpoint(&["tags", &id.to_string(), "notes", ""])),
        )?;
        Ok(payload::tag_notes(&body))
    }
}

impl ShareApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    fn create_share_link(&mut self, file_id: i64) -> Result<String, DomainError> {
        let body = self.json(
            self.client
                .post(self.endpoint(&["share", "create", &file_id.to_string()])),
        )?;
        payload::required_str(&body, "url")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(Url::parse(base).unwrap(), None).unwrap()
    }

    #[test]
    fn given_trailing_empty_segment_when_building_endpoint_then_keeps_trailing_slash() {
        let url = api("http://127.0.0.1:8000").endpoint(&["notes", "all", ""]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/notes/all/");
    }

    #[test]
    fn given_base_with_prefix_when_building_endpoint_then_appends_below_prefix() {
        let url = api("https://example.com/diary/").endpoint(&["notes", "12"]);
        assert_eq!(url.as_str(), "https://example.com/diary/notes/12");
    }

    #[test]
    fn given_filename_with_spaces_when_building_endpoint_then_percent_encodes_segment() {
        let url = api("http://h").endpoint(&["images", "delete", "my pic#1.png"]);
        assert_eq!(url.as_str(), "http://h/images/delete/my%20pic%231.png");
    }
}
