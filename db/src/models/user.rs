use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::users;

#[derive(Clone, Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
}

impl User {
    pub fn create(conn: &PgConnection, username: &str) -> Result<User, Error> {
        use crate::schema::users::table;

        let user = diesel::insert_into(table)
            .values(NewUser {
                username: username.to_string(),
            })
            .get_result(conn)?;

        Ok(user)
    }

    pub fn find_by_id(conn: &PgConnection, user_id: i32) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::users;

        let user = users.find(user_id).first::<User>(conn).optional()?;

        Ok(user)
    }

    pub fn find_by_username(conn: &PgConnection, name: &str) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::{username, users};

        let user = users
            .filter(username.eq(name))
            .first::<User>(conn)
            .optional()?;

        Ok(user)
    }

    pub fn get_all(conn: &PgConnection) -> Result<Vec<User>, Error> {
        use crate::schema::users::dsl::{username, users};

        let results = users.order(username).load::<User>(conn)?;

        Ok(results)
    }

    pub fn rename(conn: &PgConnection, user_id: i32, new_name: &str) -> Result<User, Error> {
        use crate::schema::users::dsl::{updated_at, username, users};

        let user = diesel::update(users.find(user_id))
            .set((username.eq(new_name), updated_at.eq(Utc::now())))
            .get_result::<User>(conn)
            .optional()?;

        user.ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))
    }
}
