use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "home_pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub site_name: String,
    pub logo: String,
    pub welcome_titre: String,
    pub welcome_message: String,
    pub action1_message: String,
    pub action1_lien: String,
    pub action2_message: String,
    pub action2_lien: String,
    pub contact_message: String,
    pub about_message: String,
    pub footer_message: String,
    pub footer_bouton_message: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
