//! Generic data-access helpers shared by the per-entity services.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QuerySelect, Select, Value,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    response::Meta,
    routes::params::Pagination,
};

/// A set of optional field changes for one entity.
///
/// Implementors only `Set` the columns they carry; everything else stays
/// `Unchanged`, so the resulting UPDATE touches exactly those columns.
pub trait Patch<A: ActiveModelTrait> {
    fn apply(self, active: &mut A);
}

/// `Set` the field when a value was supplied; reports whether it did.
pub fn set_if<V>(field: &mut ActiveValue<V>, value: Option<V>) -> bool
where
    V: Into<Value>,
{
    match value {
        Some(value) => {
            *field = ActiveValue::Set(value);
            true
        }
        None => false,
    }
}

/// Load the row with `id`, apply `patch` and write back the changed columns.
///
/// An empty patch returns the current row without issuing an UPDATE.
pub async fn update_by_id<A, P, C>(
    conn: &C,
    id: Uuid,
    patch: P,
    resource: &'static str,
) -> AppResult<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Clone,
    Uuid: Into<<<A::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    P: Patch<A>,
    C: ConnectionTrait,
{
    let existing = <A::Entity as EntityTrait>::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound(resource))?;

    let mut active = existing.clone().into_active_model();
    patch.apply(&mut active);
    if !active.is_changed() {
        return Ok(existing);
    }

    Ok(active.update(conn).await?)
}

pub async fn delete_by_id<E, C>(conn: &C, id: Uuid, resource: &'static str) -> AppResult<()>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(resource));
    }
    Ok(())
}

/// Run `select` for one page and count the full result set.
pub async fn fetch_page<E, C>(
    conn: &C,
    select: Select<E>,
    pagination: &Pagination,
) -> AppResult<(Vec<E::Model>, Meta)>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let (page, per_page, offset) = pagination.normalize();
    let total = select.clone().count(conn).await? as i64;
    let items = select
        .limit(per_page as u64)
        .offset(offset as u64)
        .all(conn)
        .await?;
    Ok((items, Meta::new(page, per_page, total)))
}

/// Convert a page of entity models into API models.
pub fn convert<M, T: From<M>>(items: Vec<M>) -> Vec<T> {
    items.into_iter().map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{ActiveValue, IntoActiveModel};

    use super::*;
    use crate::{
        dto::coffees::UpdateCoffeeRequest,
        entity::coffees::{ActiveModel, Model},
    };

    fn coffee() -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            category_id: None,
            name: "Flat White".into(),
            description: None,
            price: 450,
            image_url: None,
            is_available: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn patch_sets_only_supplied_fields() {
        let mut active: ActiveModel = coffee().into_active_model();
        UpdateCoffeeRequest {
            price: Some(700),
            ..Default::default()
        }
        .apply(&mut active);

        assert!(matches!(active.price, ActiveValue::Set(700)));
        assert!(!active.name.is_set());
        assert!(!active.description.is_set());
        assert!(active.updated_at.is_set());
        assert!(active.is_changed());
    }

    #[test]
    fn empty_patch_leaves_model_unchanged() {
        let mut active: ActiveModel = coffee().into_active_model();
        UpdateCoffeeRequest::default().apply(&mut active);
        assert!(!active.is_changed());
    }
}
