use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_category::Entity")]
    DocumentCategory,
}

impl Related<super::document_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentCategory.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_category::Relation::Document.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
