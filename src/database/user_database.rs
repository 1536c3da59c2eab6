use async_trait::async_trait;
use log::info;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres, QueryBuilder};
use crate::core::UserDbConfig;
use crate::database::{SortValue, StoreError, UserStore};
use crate::model::{SortOrder, SortSpec, UserDocument, UserFilter};

/// Migrations creating the `xp_users` table.
pub static MIGRATOR: Migrator = sqlx::migrate!();

const USER_COLUMNS: &str = "SELECT id, name, wallet_address, has_streaming_access, total_experience_points, xp_multiplier, tier, badge_count FROM xp_users";

#[derive(Debug, Clone)]
pub struct UserDatabase {
    pool: Pool<Postgres>,
}

impl UserDatabase {

    pub async fn new(config: &UserDbConfig) -> Result<Self, sqlx::Error> {
        let opt = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .database(&config.db_name)
            .username(&config.db_user)
            .password(&config.db_password);
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(opt)
            .await?;
        info!("Established connection to the user database.");
        Ok(UserDatabase { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await?;
        info!("User database migrations applied.");
        Ok(())
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    if let UserFilter::NameContains(term) = filter {
        builder.push(" WHERE name ILIKE ")
            .push_bind(like_pattern(term))
            .push(" ESCAPE '\\'");
    }
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn from_sql_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl UserStore for UserDatabase {

    async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM xp_users");
        push_filter(&mut builder, filter);
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(from_sql_count(count))
    }

    async fn find_users(&self, filter: &UserFilter, sort: SortSpec, skip: u64, limit: u64) -> Result<Vec<UserDocument>, StoreError> {
        let nulls = match sort.order {
            SortOrder::Ascending => "NULLS FIRST",
            SortOrder::Descending => "NULLS LAST",
        };
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(USER_COLUMNS);
        push_filter(&mut builder, filter);
        //the column comes from the SortField whitelist, never from user input
        builder.push(format!(" ORDER BY {} {} {}, id COLLATE \"C\" ASC", sort.field.column(), sort.order.sql_keyword(), nulls))
            .push(" LIMIT ")
            .push_bind(to_sql_count(limit))
            .push(" OFFSET ")
            .push_bind(to_sql_count(skip));
        let users = builder.build_query_as::<UserDocument>().fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn count_ranked_ahead(&self, sort: SortSpec, pivot: &SortValue) -> Result<u64, StoreError> {
        let comparison = match sort.order {
            SortOrder::Descending => ">",
            SortOrder::Ascending => "<",
        };
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM xp_users WHERE ");
        builder.push(format!("{} {} ", sort.field.column(), comparison));
        match pivot {
            SortValue::Missing => return Ok(0),
            SortValue::Integer(value) => builder.push_bind(*value),
            SortValue::Float(value) => builder.push_bind(*value),
            SortValue::Text(value) => builder.push_bind(value.clone()),
        };
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(from_sql_count(count))
    }
}
