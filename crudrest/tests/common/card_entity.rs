use crudrest::{FieldTable, Resource};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "card_transactions")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub amount: f64,
    pub memo: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Model {
    type Id = i64;
    const RESOURCE_NAME_SINGULAR: &'static str = "CardTransaction";
    const RESOURCE_NAME_PLURAL: &'static str = "transactions";

    fn id(&self) -> i64 {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        crudrest::field_table!(Model { id, amount, memo })
    }
}
