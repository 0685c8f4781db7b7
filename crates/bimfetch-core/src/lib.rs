pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod loading;
pub mod model;
pub mod query;
pub mod resolve;
pub mod storage;
pub mod url_model;

pub use error::{DescriptorError, ModelLoadError};
pub use loader::{FragmentsIngest, IfcIngest, IngestError};
pub use loading::{load_fragments_from_url, load_ifc_from_url, load_models, load_one_model};
pub use model::{ModelDescriptor, ModelFormat};
pub use query::parse_models_from_query_string;
pub use resolve::resolve_models;
pub use url_model::model_name_from_url;
