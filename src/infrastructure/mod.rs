//! Infrastructure layer - external concerns

pub mod database;
pub mod documents;
pub mod notifier;
pub mod storage;

pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use documents::TextDocumentGenerator;
pub use notifier::EventBusNotifier;
pub use storage::InMemoryRepositoryProvider;
