//! The citizen record and its request variants.
//!
//! - [`Citizen`] is the stored record, read back from the `citizens` collection.
//! - [`NewCitizen`] is a creation payload; every field is required.
//! - [`CitizenPatch`] is a partial update; only supplied fields are written.
//! - [`CitizenCriteria`] holds the named list parameters and builds the
//!   equality [`Filter`] for a list query.
//!
//! JSON uses camelCase field names with `_id` as a 24-character hex string and
//! the date of birth as an RFC 3339 timestamp. In the store, the date of birth
//! is a native BSON datetime and the postal code an int32.

use bson::{Bson, DateTime as BsonDateTime, Document as BsonDocument, oid::ObjectId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    document::{Document, ToDocument},
    error::{DocumentStoreError, DocumentStoreResult, QueryError},
    query::Filter,
};

/// Stored field names.
pub mod fields {
    pub const ID: &str = "_id";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const GENDER: &str = "gender";
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const PINCODE: &str = "pincode";
}

/// A stored citizen record.
///
/// Any field other than the identifier may be absent in storage; absent fields
/// are left out of the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citizen {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<i32>,
}

impl Document for Citizen {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn collection_name() -> &'static str {
        "citizens"
    }

    fn from_document(document: BsonDocument) -> DocumentStoreResult<Self> {
        let id = match document.get(fields::ID) {
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => {
                return Err(DocumentStoreError::InvalidDocument(format!(
                    "expected ObjectId for {}, found {:?}",
                    fields::ID,
                    other.element_type()
                )));
            }
            None => {
                return Err(DocumentStoreError::InvalidDocument(format!(
                    "missing {}",
                    fields::ID
                )));
            }
        };

        Ok(Citizen {
            id,
            first_name: read_string(&document, fields::FIRST_NAME)?,
            last_name: read_string(&document, fields::LAST_NAME)?,
            date_of_birth: read_datetime(&document, fields::DATE_OF_BIRTH)?,
            gender: read_string(&document, fields::GENDER)?,
            address: read_string(&document, fields::ADDRESS)?,
            city: read_string(&document, fields::CITY)?,
            state: read_string(&document, fields::STATE)?,
            pincode: read_i32(&document, fields::PINCODE)?,
        })
    }
}

/// A creation payload. All eight fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCitizen {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: i32,
}

/// A required field was absent or held its zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("required field {0} is missing")]
pub struct MissingField(pub &'static str);

impl NewCitizen {
    /// Checks that no required field holds a zero value.
    ///
    /// Deserialization already rejects absent fields; this additionally treats an
    /// empty string or a `0` postal code as missing.
    pub fn validate(&self) -> Result<(), MissingField> {
        let text = [
            (fields::FIRST_NAME, &self.first_name),
            (fields::LAST_NAME, &self.last_name),
            (fields::GENDER, &self.gender),
            (fields::ADDRESS, &self.address),
            (fields::CITY, &self.city),
            (fields::STATE, &self.state),
        ];

        if let Some((name, _)) = text.iter().find(|(_, value)| value.is_empty()) {
            return Err(MissingField(*name));
        }
        if self.pincode == 0 {
            return Err(MissingField(fields::PINCODE));
        }

        Ok(())
    }

    /// Combines this payload with the identifier the store assigned to it.
    pub fn into_citizen(self, id: ObjectId) -> Citizen {
        Citizen {
            id,
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            date_of_birth: Some(self.date_of_birth),
            gender: Some(self.gender),
            address: Some(self.address),
            city: Some(self.city),
            state: Some(self.state),
            pincode: Some(self.pincode),
        }
    }
}

impl ToDocument for NewCitizen {
    fn to_document(&self) -> DocumentStoreResult<BsonDocument> {
        let mut document = BsonDocument::new();
        document.insert(fields::FIRST_NAME, self.first_name.as_str());
        document.insert(fields::LAST_NAME, self.last_name.as_str());
        document.insert(fields::DATE_OF_BIRTH, BsonDateTime::from_chrono(self.date_of_birth));
        document.insert(fields::GENDER, self.gender.as_str());
        document.insert(fields::ADDRESS, self.address.as_str());
        document.insert(fields::CITY, self.city.as_str());
        document.insert(fields::STATE, self.state.as_str());
        document.insert(fields::PINCODE, self.pincode);
        Ok(document)
    }
}

/// A partial update. Only supplied, non-zero fields are written.
///
/// The identifier is never part of a patch; an `_id` key in the request body is
/// ignored like any other unknown key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<i32>,
}

impl ToDocument for CitizenPatch {
    fn to_document(&self) -> DocumentStoreResult<BsonDocument> {
        let mut document = BsonDocument::new();

        let text = [
            (fields::FIRST_NAME, &self.first_name),
            (fields::LAST_NAME, &self.last_name),
            (fields::GENDER, &self.gender),
            (fields::ADDRESS, &self.address),
            (fields::CITY, &self.city),
            (fields::STATE, &self.state),
        ];
        for (name, value) in text {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                document.insert(name, value);
            }
        }

        if let Some(date_of_birth) = self.date_of_birth {
            document.insert(fields::DATE_OF_BIRTH, BsonDateTime::from_chrono(date_of_birth));
        }
        if let Some(pincode) = self.pincode.filter(|p| *p != 0) {
            document.insert(fields::PINCODE, pincode);
        }

        Ok(document)
    }
}

/// Named list parameters, as they appear in the query string.
///
/// Every parameter is optional; an empty value is the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CitizenCriteria {
    #[serde(rename = "fn")]
    pub first_name: Option<String>,
    #[serde(rename = "ln")]
    pub last_name: Option<String>,
    #[serde(rename = "dob")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "gd")]
    pub gender: Option<String>,
    #[serde(rename = "ad")]
    pub address: Option<String>,
    #[serde(rename = "ct")]
    pub city: Option<String>,
    #[serde(rename = "st")]
    pub state: Option<String>,
    #[serde(rename = "pin")]
    pub pincode: Option<String>,
}

impl CitizenCriteria {
    /// Builds the equality filter for these criteria.
    ///
    /// One clause is added per non-empty parameter, in the order first name,
    /// last name, date of birth, gender, address, city, state, postal code. No
    /// parameters yields the empty filter, which matches every record.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidParameter`] if `pin` is not an integer.
    pub fn to_filter(&self) -> Result<Filter, QueryError> {
        let mut filter = Filter::new();

        if let Some(v) = present(&self.first_name) {
            filter.push(fields::FIRST_NAME, v);
        }
        if let Some(v) = present(&self.last_name) {
            filter.push(fields::LAST_NAME, v);
        }
        if let Some(v) = present(&self.date_of_birth) {
            filter.push(fields::DATE_OF_BIRTH, date_of_birth_value(v));
        }
        if let Some(v) = present(&self.gender) {
            filter.push(fields::GENDER, v);
        }
        if let Some(v) = present(&self.address) {
            filter.push(fields::ADDRESS, v);
        }
        if let Some(v) = present(&self.city) {
            filter.push(fields::CITY, v);
        }
        if let Some(v) = present(&self.state) {
            filter.push(fields::STATE, v);
        }
        if let Some(v) = present(&self.pincode) {
            let pincode = v.parse::<i64>().map_err(|_| QueryError::InvalidParameter {
                name: "pin",
                value: v.to_string(),
            })?;
            filter.push(fields::PINCODE, pincode);
        }

        Ok(filter)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builds the `dob` clause value.
///
/// Dates of birth are stored as datetimes, so the supplied text is
/// intentionally converted rather than compared as a string: an RFC 3339
/// timestamp or a `YYYY-MM-DD` date (midnight UTC) becomes a datetime. Any
/// other text is kept as given and matches no stored record.
fn date_of_birth_value(raw: &str) -> Bson {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Bson::DateTime(BsonDateTime::from_chrono(timestamp.with_timezone(&Utc)));
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        Some(midnight) => Bson::DateTime(BsonDateTime::from_chrono(midnight.and_utc())),
        None => Bson::String(raw.to_string()),
    }
}

fn read_string(document: &BsonDocument, key: &str) -> DocumentStoreResult<Option<String>> {
    match document.get(key) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(unexpected(key, "string", other)),
    }
}

fn read_datetime(document: &BsonDocument, key: &str) -> DocumentStoreResult<Option<DateTime<Utc>>> {
    match document.get(key) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(value)) => Ok(Some(value.to_chrono())),
        Some(other) => Err(unexpected(key, "datetime", other)),
    }
}

fn read_i32(document: &BsonDocument, key: &str) -> DocumentStoreResult<Option<i32>> {
    match document.get(key) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::Int32(value)) => Ok(Some(*value)),
        Some(Bson::Int64(value)) => i32::try_from(*value)
            .map(Some)
            .map_err(|_| DocumentStoreError::InvalidDocument(format!("{key} out of range: {value}"))),
        Some(other) => Err(unexpected(key, "int32", other)),
    }
}

fn unexpected(key: &str, expected: &str, found: &Bson) -> DocumentStoreError {
    DocumentStoreError::InvalidDocument(format!(
        "expected {expected} for {key}, found {:?}",
        found.element_type()
    ))
}

mod object_id_hex {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ObjectId::parse_str(&hex).map_err(D::Error::custom)
    }
}
