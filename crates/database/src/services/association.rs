//! Subject links for teachers and classes.
//!
//! Callers name subjects, the store links ids. [`resolve_subjects`] translates names to ids,
//! [`sync_subjects`] reconciles an owner's stored links with a desired list of names and
//! [`subject_names_by_owner`] goes the other way for listings.

use crate::{
    entities::{class_subjects, subjects, teacher_subjects},
    error::ServiceError,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A junction table pairing an owning entity with subjects
pub trait SubjectLink: EntityTrait {
    /// Name of the owning entity, for log lines
    const OWNER: &'static str;

    type Link: ActiveModelTrait<Entity = Self> + Send;

    fn owner_column() -> Self::Column;
    fn subject_column() -> Self::Column;
    fn owner_of(link: &Self::Model) -> Uuid;
    fn subject_of(link: &Self::Model) -> Uuid;
    fn link(owner_id: Uuid, subject_id: Uuid) -> Self::Link;
}

impl SubjectLink for teacher_subjects::Entity {
    const OWNER: &'static str = "teacher";

    type Link = teacher_subjects::ActiveModel;

    fn owner_column() -> Self::Column {
        teacher_subjects::Column::TeacherId
    }

    fn subject_column() -> Self::Column {
        teacher_subjects::Column::SubjectId
    }

    fn owner_of(link: &Self::Model) -> Uuid {
        link.teacher_id
    }

    fn subject_of(link: &Self::Model) -> Uuid {
        link.subject_id
    }

    fn link(owner_id: Uuid, subject_id: Uuid) -> Self::Link {
        teacher_subjects::ActiveModel {
            teacher_id: Set(owner_id),
            subject_id: Set(subject_id),
        }
    }
}

impl SubjectLink for class_subjects::Entity {
    const OWNER: &'static str = "class";

    type Link = class_subjects::ActiveModel;

    fn owner_column() -> Self::Column {
        class_subjects::Column::ClassId
    }

    fn subject_column() -> Self::Column {
        class_subjects::Column::SubjectId
    }

    fn owner_of(link: &Self::Model) -> Uuid {
        link.class_id
    }

    fn subject_of(link: &Self::Model) -> Uuid {
        link.subject_id
    }

    fn link(owner_id: Uuid, subject_id: Uuid) -> Self::Link {
        class_subjects::ActiveModel {
            class_id: Set(owner_id),
            subject_id: Set(subject_id),
        }
    }
}

/// Outcome of looking subject names up in the reference table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// One id per distinct matched name
    pub ids: Vec<Uuid>,
    /// Distinct names with no matching subject, in input order
    pub unresolved: Vec<String>,
}

/// Translates subject names into subject ids with a single lookup.
///
/// Names are trimmed and deduplicated. Unknown names are reported, not treated as errors.
pub async fn resolve_subjects<C>(conn: &C, names: &[String]) -> Result<Resolution, DbErr>
where
    C: ConnectionTrait,
{
    let mut seen = HashSet::new();
    let wanted: Vec<&str> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| seen.insert(*name))
        .collect();

    if wanted.is_empty() {
        return Ok(Resolution::default());
    }

    let found: HashMap<String, Uuid> = subjects::Entity::find()
        .select_only()
        .column(subjects::Column::Id)
        .column(subjects::Column::Name)
        .filter(subjects::Column::Name.is_in(wanted.iter().copied()))
        .into_tuple::<(Uuid, String)>()
        .all(conn)
        .await?
        .into_iter()
        .map(|(id, name)| (name, id))
        .collect();

    let mut resolution = Resolution::default();
    for name in wanted {
        match found.get(name) {
            Some(&id) => resolution.ids.push(id),
            None => resolution.unresolved.push(name.to_owned()),
        }
    }

    Ok(resolution)
}

/// Rows touched by a [`sync_subjects`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub added: usize,
    pub removed: usize,
}

/// Makes the subjects linked to `owner_id` exactly the subjects named in `names`.
///
/// Fails with [`ServiceError::UnresolvedAssociation`] before touching any row if a name is
/// unknown. Only stale links are deleted and only missing links inserted, so repeating a call
/// changes nothing. `conn` should be the transaction that also writes the owner row.
pub async fn sync_subjects<L, C>(
    conn: &C,
    owner_id: Uuid,
    names: &[String],
) -> Result<SyncOutcome, ServiceError>
where
    L: SubjectLink,
    L::Model: IntoActiveModel<L::Link>,
    C: ConnectionTrait,
{
    let resolution = resolve_subjects(conn, names).await?;
    if !resolution.unresolved.is_empty() {
        return Err(ServiceError::UnresolvedAssociation {
            names: resolution.unresolved,
        });
    }

    let desired: HashSet<Uuid> = resolution.ids.into_iter().collect();
    let current: HashSet<Uuid> = L::find()
        .filter(L::owner_column().eq(owner_id))
        .all(conn)
        .await?
        .iter()
        .map(L::subject_of)
        .collect();

    let stale: Vec<Uuid> = current.difference(&desired).copied().collect();
    let missing: Vec<Uuid> = desired.difference(&current).copied().collect();

    if !stale.is_empty() {
        L::delete_many()
            .filter(L::owner_column().eq(owner_id))
            .filter(L::subject_column().is_in(stale.iter().copied()))
            .exec(conn)
            .await?;
    }

    if !missing.is_empty() {
        L::insert_many(
            missing
                .iter()
                .map(|&subject_id| L::link(owner_id, subject_id)),
        )
        .exec_without_returning(conn)
        .await?;
    }

    debug!(
        "Synced subjects for {} {owner_id}: {} added, {} removed",
        L::OWNER,
        missing.len(),
        stale.len()
    );

    Ok(SyncOutcome {
        added: missing.len(),
        removed: stale.len(),
    })
}

/// Deletes every subject link of `owner_id`
pub async fn clear_subjects<L, C>(conn: &C, owner_id: Uuid) -> Result<u64, DbErr>
where
    L: SubjectLink,
    C: ConnectionTrait,
{
    let result = L::delete_many()
        .filter(L::owner_column().eq(owner_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

/// Deletes every link pointing at `subject_id`
pub async fn unlink_subject<L, C>(conn: &C, subject_id: Uuid) -> Result<u64, DbErr>
where
    L: SubjectLink,
    C: ConnectionTrait,
{
    let result = L::delete_many()
        .filter(L::subject_column().eq(subject_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

/// Looks up the linked subject names for each owner, sorted alphabetically.
///
/// Owners without links are absent from the map.
pub async fn subject_names_by_owner<L, C>(
    conn: &C,
    owner_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, DbErr>
where
    L: SubjectLink,
    C: ConnectionTrait,
{
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = L::find()
        .filter(L::owner_column().is_in(owner_ids.iter().copied()))
        .all(conn)
        .await?;

    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let subject_ids: HashSet<Uuid> = links.iter().map(L::subject_of).collect();
    let names: HashMap<Uuid, String> = subjects::Entity::find()
        .select_only()
        .column(subjects::Column::Id)
        .column(subjects::Column::Name)
        .filter(subjects::Column::Id.is_in(subject_ids))
        .into_tuple::<(Uuid, String)>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    let mut by_owner: HashMap<Uuid, Vec<String>> = HashMap::new();
    for link in &links {
        if let Some(name) = names.get(&L::subject_of(link)) {
            by_owner
                .entry(L::owner_of(link))
                .or_default()
                .push(name.clone());
        }
    }

    for names in by_owner.values_mut() {
        names.sort();
    }

    Ok(by_owner)
}
