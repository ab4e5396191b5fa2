use myddl::{
    schema::{Column, ForeignKey, Index, PrimaryKey, UniqueKey},
    Database, Table,
};

pub fn init() {
    env_logger::try_init().ok();
}

/// `id` serial primary key, `name` unique, `email` + `address` indexed
pub fn user_table() -> Table {
    let mut id = Column::integer("id", "int").unwrap();
    id.set_unsigned(true).unwrap().set_auto_increment(true).unwrap();

    let mut name = Column::varchar("name", 20).unwrap();
    name.set_default("NONAME").unwrap();

    let mut email = Column::varchar("email", 100).unwrap();
    email.set_nullable(true).unwrap();

    let mut created = Column::timestamp("created").unwrap();
    created.set_default_current(true).unwrap();

    let mut table = Table::new("user").unwrap();
    table
        .add_column(id)
        .unwrap()
        .add_column(name)
        .unwrap()
        .add_column(email)
        .unwrap()
        .add_column(Column::varchar("address", 100).unwrap())
        .unwrap()
        .add_column(created)
        .unwrap()
        .set_primary_key(PrimaryKey::new(["id"]).unwrap())
        .unwrap()
        .add_unique_key(UniqueKey::new("uk_name", ["name"]).unwrap())
        .unwrap()
        .add_index(Index::new("idx_email_address", ["email", "address"]).unwrap())
        .unwrap();

    table
}

/// Posts referencing `user.id`
pub fn post_table() -> Table {
    let mut id = Column::integer("id", "bigint").unwrap();
    id.set_unsigned(true).unwrap().set_auto_increment(true).unwrap();

    let mut author_id = Column::integer("author_id", "int").unwrap();
    author_id.set_unsigned(true).unwrap();

    let mut table = Table::new("post").unwrap();
    table
        .add_column(id)
        .unwrap()
        .add_column(author_id)
        .unwrap()
        .add_column(Column::varchar("title", 200).unwrap())
        .unwrap()
        .add_column(Column::text("body", "mediumtext").unwrap())
        .unwrap()
        .set_primary_key(PrimaryKey::new(["id"]).unwrap())
        .unwrap()
        .add_foreign_key(
            ForeignKey::new(
                "fk_post_author",
                ["author_id"],
                "user",
                Some(["id"]),
                Some("cascade"),
                Some("no action"),
            )
            .unwrap(),
        )
        .unwrap();

    table
}

/// Database `app` holding `user` then `post`
pub fn run_test<F>(f: F)
where
    F: FnOnce(Database),
{
    init();

    let mut db = Database::new("app").unwrap();
    db.add_table(user_table())
        .unwrap()
        .add_table(post_table())
        .unwrap();

    f(db);
}
