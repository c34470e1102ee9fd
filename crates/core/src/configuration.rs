//! Provider image configuration, the one singleton synced with update
//! semantics.
//!
//! The provider nests the image settings under `images`; the downstream
//! store keeps them flat next to `change_keys` and addresses the record by
//! its `documentId`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::de::null_as_default;

/// Image base URLs and size lists published by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secure_base_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backdrop_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub poster_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub still_sizes: Vec<String>,
}

/// Full configuration snapshot as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_keys: Vec<String>,
}

/// A configuration record already present downstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredConfiguration {
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(flatten)]
    pub images: ImageConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_keys: Vec<String>,
}

impl StoredConfiguration {
    /// The stored values re-nested in provider shape, for comparison.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            images: self.images.clone(),
            change_keys: self.change_keys.clone(),
        }
    }
}

impl ConfigurationSnapshot {
    /// Flat downstream payload.
    pub fn to_record(&self) -> Value {
        json!({
            "base_url": self.images.base_url,
            "secure_base_url": self.images.secure_base_url,
            "backdrop_sizes": self.images.backdrop_sizes,
            "logo_sizes": self.images.logo_sizes,
            "poster_sizes": self.images.poster_sizes,
            "profile_sizes": self.images.profile_sizes,
            "still_sizes": self.images.still_sizes,
            "change_keys": self.change_keys,
        })
    }

    /// Names of the fields that differ from `other`.
    ///
    /// Lists compare element by element, so a reordering counts as a
    /// change. An empty result means no update is needed.
    pub fn changed_fields(&self, other: &ConfigurationSnapshot) -> Vec<&'static str> {
        let (a, b) = (&self.images, &other.images);
        let checks = [
            ("base_url", a.base_url == b.base_url),
            ("secure_base_url", a.secure_base_url == b.secure_base_url),
            ("backdrop_sizes", a.backdrop_sizes == b.backdrop_sizes),
            ("logo_sizes", a.logo_sizes == b.logo_sizes),
            ("poster_sizes", a.poster_sizes == b.poster_sizes),
            ("profile_sizes", a.profile_sizes == b.profile_sizes),
            ("still_sizes", a.still_sizes == b.still_sizes),
            ("change_keys", self.change_keys == other.change_keys),
        ];
        checks
            .into_iter()
            .filter(|(_, same)| !same)
            .map(|(name, _)| name)
            .collect()
    }
}
