//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `posts` table.
//! - Map `PostCategory` to its stored label and back.
//!
//! # Invariants
//! - `created_at` is written once; every update refreshes `updated_at`.
//! - Rows that break a post format rule surface as `RepoError::InvalidData`.

use crate::db::migrations::POSTS_TABLE;
use crate::model::post::{Post, PostCategory, PostId};
use crate::repo::{
    count_from_db, ensure_connection_ready, push_pagination, RepoError, RepoResult,
};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_ENTITY: &str = "post";
const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

/// Filter and pagination options for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub category: Option<PostCategory>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, post: &Post) -> RepoResult<Post>;
    fn update_post(&self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    fn count_posts(&self) -> RepoResult<u64>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &POSTS_TABLE)?;
        Ok(Self { conn })
    }

    fn reload(&self, id: PostId) -> RepoResult<Post> {
        self.get_post(id)?.ok_or(RepoError::NotFound {
            entity: POST_ENTITY,
            id,
        })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &Post) -> RepoResult<Post> {
        if let Some(id) = post.id() {
            return Err(RepoError::AlreadyPersisted {
                entity: POST_ENTITY,
                id,
            });
        }

        self.conn.execute(
            "INSERT INTO posts (title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title(),
                post.content(),
                post.category().map(PostCategory::as_str),
                post.summary(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("event=post_create module=repo status=ok post_id={id}");
        self.reload(id)
    }

    fn update_post(&self, post: &Post) -> RepoResult<Post> {
        let id = post.id().ok_or(RepoError::NotPersisted(POST_ENTITY))?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                category = ?3,
                summary = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                post.title(),
                post.content(),
                post.category().map(PostCategory::as_str),
                post.summary(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: POST_ENTITY,
                id,
            });
        }

        info!("event=post_update module=repo status=ok post_id={id}");
        self.reload(id)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY id ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        debug!(
            "event=post_list module=repo status=ok count={} category={}",
            posts.len(),
            query.category.map_or("any", PostCategory::as_str)
        );
        Ok(posts)
    }

    fn count_posts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))?;
        count_from_db(POSTS_TABLE.name, count)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: POST_ENTITY,
                id,
            });
        }

        info!("event=post_delete module=repo status=ok post_id={id}");
        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    Post::from_storage(
        id,
        row.get("title")?,
        row.get("content")?,
        row.get("summary")?,
        row.get("category")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("posts row {id}: {err}")))
}
