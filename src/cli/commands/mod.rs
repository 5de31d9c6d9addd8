mod list;
mod now_playing;

pub use list::ListCommand;
pub use now_playing::NowPlayingCommand;
