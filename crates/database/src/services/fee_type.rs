use super::{default_true, now, validate};
use crate::{entities::fee_types, error::ServiceError};
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewFeeType {
    pub name: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub struct FeeTypeService;

impl FeeTypeService {
    /// Lists the fee types that can be charged, by name
    pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<fee_types::Model>, DbErr> {
        fee_types::Entity::find()
            .filter(fee_types::Column::IsActive.eq(true))
            .order_by_asc(fee_types::Column::Name)
            .all(db)
            .await
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: NewFeeType,
    ) -> Result<fee_types::Model, ServiceError> {
        validate::required("name", &input.name)?;
        if let Some(amount) = input.amount
            && (amount < 0.0 || amount.is_nan())
        {
            return Err(ServiceError::validation("amount", "must not be negative"));
        }

        let timestamp = now();
        let fee_type = fee_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_owned()),
            description: Set(input.description),
            amount: Set(input.amount),
            is_active: Set(input.is_active),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(db)
        .await?;

        info!("Created fee type {} ({})", fee_type.name, fee_type.id);
        Ok(fee_type)
    }
}
