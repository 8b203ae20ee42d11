// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod deals_csv_datasource;
        pub(crate) mod deals_xlsx_datasource;
        pub(crate) mod rates_api_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod cell_value_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod records_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod cell_value;
        pub(crate) mod deal_row;
        pub(crate) mod rate_table;
        pub(crate) mod report;
    }
    pub(crate) mod logic {
        pub(crate) mod amount_normalizer;
        pub(crate) mod close_date_extractor;
        pub(crate) mod row_mapper;
    }
    pub(crate) mod repositories {
        pub(crate) mod records_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod convert_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod deals_xlsx_printer;
    pub(crate) mod report_fmt;
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
        pub use crate::domain::entities::cell_value::*;
        pub use crate::domain::entities::deal_row::*;
        pub use crate::domain::entities::rate_table::*;
        pub use crate::domain::entities::report::*;
    }

    pub mod rates {
        pub use crate::data::datasources::rates_api_datasource::{
            RatesApiDatasourceImpl, RatesDatasource, StaticRatesDatasource,
        };
    }

    pub mod delivery {
        pub use crate::presentation::deals_xlsx_printer::{
            SUGGESTED_FILE_NAME, XLSX_CONTENT_TYPE,
        };
    }
}
