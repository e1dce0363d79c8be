// Service exports
pub mod memory;
pub mod store;
pub mod supabase;
pub mod workspace;

pub use memory::InMemoryStore;
pub use store::{tables, DataStore, Filter, Order, Record, StoreError};
pub use supabase::SupabaseClient;
pub use workspace::{FreelanceService, ServiceError};
