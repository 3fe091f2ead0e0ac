//! Products and their category links.

use sea_orm::entity::prelude::*;

use crate::Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
    #[sea_orm(has_many = "super::user_orders::Entity")]
    Orders,
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::user_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_categories::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A product together with the categories it is linked to.
///
/// `categories` carries no ordering guarantee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub name: Option<String>,
    pub categories: Vec<Category>,
}

impl Product {
    pub(crate) fn from_parts(model: Model, categories: Vec<super::categories::Model>) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            categories: categories.into_iter().map(Category::from).collect(),
        }
    }
}
