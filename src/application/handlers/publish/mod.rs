//! Publication coordinator.

mod publish_all;

pub use publish_all::{
    PublishAllCommand, PublishAllHandler, PublishItemResult, PublishReport,
};
