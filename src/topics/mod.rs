// Topic extraction — two source modalities converging on one TopicSet shape.

pub mod model;
pub mod set;
pub mod table;
pub mod traits;
