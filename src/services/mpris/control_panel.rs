/// Commands the user interface sends to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Play/pause button
    Play,

    /// Stop button
    Stop,

    /// Previous track button
    Prev,

    /// Next track button
    Next,

    /// A player was picked from the candidate list
    SelectPlayer(String),

    /// Protocol toggle; `true` selects MPRIS2
    ToggleVersion(bool),

    /// Render the current track's metadata on demand
    RefreshMetadata,

    /// Re-list candidate players
    RefreshCandidates,
}

/// What the controller drives on the user interface side
pub trait ControlPanel: Send {
    /// Show `label` on the play/pause button: `>` when not playing, `||` when playing
    fn set_play_button_label(&mut self, label: &str);

    /// Append one line to the output log
    fn append_log_line(&mut self, line: &str);

    /// Replace the list of selectable players
    fn set_candidate_list(&mut self, names: &[String]);

    /// Current metadata template, read on every render
    fn format_template(&self) -> String;
}
