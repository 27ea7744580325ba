// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A stable, random identifier used across the model and persistence surfaces.
///
/// Ids are UUIDv4 under the hood; the phantom tag keeps message ids and setup
/// ids from being mixed up at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn random() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let value = Uuid::parse_str(&raw).map_err(D::Error::custom)?;
        Ok(Self::from_uuid(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageIdTag {}
pub type MessageId = Id<MessageIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SetupIdTag {}
pub type SetupId = Id<SetupIdTag>;

#[cfg(test)]
mod tests {
    use super::{MessageId, SetupId};

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(MessageId::random(), MessageId::random());
    }

    #[test]
    fn ids_round_trip_through_json() {
        let id = SetupId::random();
        let json = serde_json::to_string(&id).expect("serialize id");
        let back: SetupId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(id, back);
    }

    #[test]
    fn deserialize_rejects_non_uuid_text() {
        let err = serde_json::from_str::<MessageId>("\"not-a-uuid\"");
        assert!(err.is_err());
    }
}
