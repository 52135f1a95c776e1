pub mod corenlp;
pub mod entities;
pub mod schema;
pub mod session;
pub mod tree;

pub use corenlp::CoreNlpClient;
pub use entities::{EntityTable, group_mentions};
pub use schema::{DependencyEdge, Relation, Sentence, SentenceBuilder};
pub use session::{AnnotationError, AnnotationSession, Annotator, RetryPolicy, SessionStats};
pub use tree::ParseTree;
