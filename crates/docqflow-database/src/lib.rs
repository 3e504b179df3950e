//! # docqflow-database
//!
//! PostgreSQL connection management, migrations, and repository
//! implementations for DocqFlow. Repositories own a [`sqlx::PgPool`] and
//! expose `*_tx` variants taking `&mut PgConnection` for the operations
//! that must run inside a caller-owned transaction.

pub mod connection;
pub mod migration;
pub mod repositories;
