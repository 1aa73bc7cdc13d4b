use std::collections::HashMap;
use std::hash::Hash;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use thiserror::Error;
use tracing::{error, instrument};

use crate::entity::{upload, user};

#[derive(Debug, Error)]
pub enum AggregationError {
    /// Connectivity, query or timeout failure reported by the store.
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(#[from] DbErr),
}

/// A user together with every upload that references it.
///
/// Built fresh on each read and never written back.
#[derive(Clone, Debug, PartialEq)]
pub struct UserWithUploads {
    pub user: user::Model,
    /// In the order the joined rows were read.
    pub uploads: Vec<upload::Model>,
}

/// Group left-joined `(owner, Option<item>)` rows by owner key.
///
/// Owners keep first-seen order and items keep read order within their
/// owner. Rows of one owner need not be adjacent. An owner whose rows carry
/// no item still gets an (empty) entry.
pub fn group_rows<U, A, K, F>(
    rows: impl IntoIterator<Item = (U, Option<A>)>,
    key_of: F,
) -> Vec<(U, Vec<A>)>
where
    K: Eq + Hash,
    F: Fn(&U) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut grouped: Vec<(U, Vec<A>)> = Vec::new();

    for (owner, item) in rows {
        let key = key_of(&owner);
        let slot = match slots.get(&key).copied() {
            Some(slot) => slot,
            None => {
                slots.insert(key, grouped.len());
                grouped.push((owner, Vec::new()));
                grouped.len() - 1
            }
        };

        if let Some(item) = item {
            grouped[slot].1.push(item);
        }
    }

    grouped
}

/// Single accumulation pass over `user LEFT JOIN upload` rows.
pub fn group_uploads_by_user(
    rows: impl IntoIterator<Item = (user::Model, Option<upload::Model>)>,
) -> Vec<UserWithUploads> {
    group_rows(rows, |u: &user::Model| u.id.clone())
        .into_iter()
        .map(|(user, uploads)| UserWithUploads { user, uploads })
        .collect()
}

/// Every user with their uploads, newest user first.
///
/// Issues one LEFT JOIN instead of a query per user. Users with equal
/// `created_at` keep whatever order the store returns them in.
#[instrument(skip(db))]
pub async fn fetch_users_with_uploads(
    db: &DatabaseConnection,
) -> Result<Vec<UserWithUploads>, AggregationError> {
    let rows = user::Entity::find()
        .find_also_related(upload::Entity)
        .order_by_desc(user::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(group_uploads_by_user(rows))
}

/// Fail-soft variant of [`fetch_users_with_uploads`].
///
/// A read failure is logged and reported as an empty list, so callers
/// cannot tell "no users" from "store unreachable". Use the tagged variant
/// when that difference matters.
pub async fn get_users_with_uploads(db: &DatabaseConnection) -> Vec<UserWithUploads> {
    match fetch_users_with_uploads(db).await {
        Ok(users) => users,
        Err(e) => {
            error!(
                operation = "get_users_with_uploads",
                error = %e,
                "Failed to fetch users with uploads"
            );
            Vec::new()
        }
    }
}
