//! Incoming webhook entity.
//!
//! An incoming webhook is the registration that lets a third party post into a
//! channel. The model is deliberately unchecked: it can be built field by field
//! or decoded from storage or the wire, and [`Model::validate`] is the single
//! authority on whether it may be persisted.
//!
//! Identity and timestamps are only stamped by the explicit lifecycle hooks
//! [`Model::pre_save`] and [`Model::pre_update`] (or by the ORM through
//! [`ActiveModelBehavior::before_save`]), never by construction or decoding.

use hooks_common::{AppError, AppResult, IdGenerator, is_valid_id, json, now_millis};
use sea_orm::{ActiveValue, ConnectionTrait, DbErr};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Read;
use validator::ValidateLength;

/// Maximum length of [`Model::display_name`] in characters.
pub const MAX_DISPLAY_NAME_LENGTH: u64 = 64;
/// Maximum length of [`Model::description`] in characters.
pub const MAX_DESCRIPTION_LENGTH: u64 = 500;
/// Maximum length of [`Model::username`] in characters.
pub const MAX_USERNAME_LENGTH: u64 = 64;
/// Maximum length of [`Model::icon_url`] in characters.
pub const MAX_ICON_URL_LENGTH: u64 = 1024;

const INVALID_ID: &str = "must be a valid 26 character identifier";
const UNSET_TIMESTAMP: &str = "must be set";

/// Incoming webhook model.
///
/// Serializes to a JSON object whose keys are the field names below. Missing
/// keys decode to their empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incoming_webhook")]
#[serde(default)]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Creation time in epoch milliseconds.
    pub create_at: i64,

    /// Last modification time in epoch milliseconds.
    pub update_at: i64,

    /// User who registered the webhook.
    pub user_id: String,

    /// Channel the webhook posts into.
    pub channel_id: String,

    /// Team owning the channel.
    pub team_id: String,

    /// Name shown in the integrations list.
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub display_name: String,

    /// Free-form description.
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub description: String,

    /// Default username for posts made through this webhook.
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub username: String,

    /// Default profile picture for posts made through this webhook.
    #[sea_orm(column_type = "String(StringLen::N(1024))")]
    pub icon_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Check every constraint, in a fixed order, and report the first one
    /// that fails.
    ///
    /// Order: `id`, `create_at`, `update_at`, `user_id`, `channel_id`,
    /// `team_id`, `display_name`, `description`, `username`, `icon_url`.
    pub fn validate(&self) -> AppResult<()> {
        check_id("id", &self.id)?;
        check_timestamp("create_at", self.create_at)?;
        check_timestamp("update_at", self.update_at)?;
        check_id("user_id", &self.user_id)?;
        check_id("channel_id", &self.channel_id)?;
        check_id("team_id", &self.team_id)?;
        check_length("display_name", &self.display_name, MAX_DISPLAY_NAME_LENGTH)?;
        check_length("description", &self.description, MAX_DESCRIPTION_LENGTH)?;
        check_length("username", &self.username, MAX_USERNAME_LENGTH)?;
        check_length("icon_url", &self.icon_url, MAX_ICON_URL_LENGTH)
    }

    /// Whether [`Self::validate`] succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Assign an id if none is set and stamp both timestamps with the
    /// current time.
    pub fn pre_save(&mut self) {
        self.pre_save_with(&IdGenerator::new(), now_millis());
    }

    /// [`Self::pre_save`] with explicit collaborators.
    pub fn pre_save_with(&mut self, id_gen: &IdGenerator, now: i64) {
        if self.id.is_empty() {
            self.id = id_gen.generate();
        }
        self.create_at = now;
        self.update_at = now;
        tracing::trace!(id = %self.id, now, "Stamped incoming webhook for insert");
    }

    /// Refresh the modification timestamp. `create_at` is left alone.
    pub fn pre_update(&mut self) {
        self.pre_update_at(now_millis());
    }

    /// [`Self::pre_update`] with an explicit clock value.
    pub fn pre_update_at(&mut self, now: i64) {
        self.update_at = now;
        tracing::trace!(id = %self.id, now, "Stamped incoming webhook for update");
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self).map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Decode from the JSON wire format. The document must be an object.
    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        json::object_from_slice(bytes).map_err(|e| AppError::MalformedPayload(e.to_string()))
    }

    /// Decode from a reader carrying the JSON wire format.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        json::object_from_reader(reader).map_err(|e| AppError::MalformedPayload(e.to_string()))
    }
}

fn check_id(field: &'static str, value: &str) -> AppResult<()> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(AppError::invalid_field(field, INVALID_ID))
    }
}

fn check_timestamp(field: &'static str, value: i64) -> AppResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(AppError::invalid_field(field, UNSET_TIMESTAMP))
    }
}

#[allow(clippy::ptr_arg)]
fn check_length(field: &'static str, value: &String, max: u64) -> AppResult<()> {
    if value.validate_length(None, Some(max), None) {
        Ok(())
    } else {
        Err(AppError::invalid_field(
            field,
            format!("must be at most {max} characters"),
        ))
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamp identity and timestamps the same way [`Model::pre_save`] and
    /// [`Model::pre_update`] do.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = now_millis();
        if insert {
            let has_id = match &self.id {
                ActiveValue::Set(id) | ActiveValue::Unchanged(id) => !id.is_empty(),
                ActiveValue::NotSet => false,
            };
            if !has_id {
                self.id = ActiveValue::Set(IdGenerator::new().generate());
            }
            self.create_at = ActiveValue::Set(now);
        }
        self.update_at = ActiveValue::Set(now);
        Ok(self)
    }
}
