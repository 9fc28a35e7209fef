mod episode_list;
mod player;

pub use episode_list::EpisodeList;
pub use player::Player;
