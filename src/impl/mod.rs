// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod file_storage;
        pub(crate) mod gist_datasource;
        pub(crate) mod key_value_storage;
        #[cfg(test)]
        pub(crate) mod mock_gist_transport;
    }
    pub(crate) mod models {
        pub(crate) mod gist_model;
        pub(crate) mod snapshot_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod cloud_repository_impl;
        pub(crate) mod ledger_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod category;
        pub(crate) mod cloud_config;
        pub(crate) mod collection;
        pub(crate) mod contact;
        pub(crate) mod debt_entry;
        pub(crate) mod period_filter;
        pub(crate) mod snapshot;
        pub(crate) mod summary;
        pub(crate) mod transaction;
    }
    pub(crate) mod logic {
        pub(crate) mod debt_ledger;
        pub(crate) mod period_filter_impl;
        pub(crate) mod summary_processor;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod cloud_repository;
        pub(crate) mod ledger_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod snapshot_usecase;
        pub(crate) mod sync_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod export_writer;
    pub(crate) mod insight_prompt;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::category::*;
        pub use crate::domain::entities::cloud_config::*;
        pub use crate::domain::entities::collection::*;
        pub use crate::domain::entities::contact::*;
        pub use crate::domain::entities::debt_entry::*;
        pub use crate::domain::entities::period_filter::*;
        pub use crate::domain::entities::snapshot::*;
        pub use crate::domain::entities::summary::*;
        pub use crate::domain::entities::transaction::*;
        pub use crate::domain::logic::debt_ledger::*;
    }

    pub mod storage {
        pub use crate::data::datasources::file_storage::*;
        pub use crate::data::datasources::key_value_storage::*;
    }

    pub mod cloud {
        pub use crate::data::datasources::gist_datasource::*;
        pub use crate::data::models::gist_model::*;
    }

    pub mod reporting {
        pub use crate::presentation::export_writer::backup_file_name;
        pub use crate::presentation::insight_prompt::*;
        pub use crate::presentation::utils::format_amount;
    }
}
