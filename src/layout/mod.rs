mod pie;
mod pyramid;
mod wordcloud;

pub use pie::*;
pub use pyramid::*;
pub use wordcloud::*;
