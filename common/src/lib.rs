//! Data Counter AI Common Library
//!
//! データカウンター写真の解析結果を扱う、I/Oを持たない共通ロジック

pub mod alias;
pub mod classifier;
pub mod error;
pub mod numeric;
pub mod parser;
pub mod presenter;
pub mod profiles;
pub mod prompts;
pub mod session;
pub mod types;

pub use alias::{Field, FieldAliases};
pub use classifier::{classify, Status, CHANCE_BAND, UNDEFINED_RATIO};
pub use error::{Error, Result};
pub use numeric::{normalize, normalize_token, UNREADABLE};
pub use parser::{extract_field_sets, extract_list, parse_field_sets, strip_code_fences};
pub use presenter::{highlight_for, present, Highlight, PresentOptions, PresentedRecord};
pub use profiles::{MachineModelProfile, ProfileTable};
pub use prompts::{build_extraction_prompt, PromptStyle};
pub use session::{SessionRecord, SessionSummary, SettingGuess};
pub use types::{format_reg_probability, MachineRecord, RawFieldSet, UNKNOWN_SLOT};
