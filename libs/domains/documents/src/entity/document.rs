use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub document_id: String,
    pub name: String,
    pub version: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub public_link: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub internal_link: Option<String>,
    pub last_modified: DateTimeWithTimeZone,
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

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_category::Relation::Document.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
