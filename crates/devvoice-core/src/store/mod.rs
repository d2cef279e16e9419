mod metadata;
mod record;

pub use {
    metadata::{MetadataMap, MetadataStore},
    record::{Annotation, Recording},
};
