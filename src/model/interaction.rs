/// High-level interaction kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    /// Idle for `frames` frames.
    #[default]
    Pause,
    /// Tap a target lane.
    Tap,
    /// Swipe across a target lane.
    Swipe,
    /// Any kind this version does not understand; expands to nothing.
    #[serde(other)]
    Unsupported,
}

/// Target lane or point for taps and swipes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionTarget {
    /// Center of the surface.
    #[default]
    Center,
    /// Upper lane.
    Top,
    /// Lower lane.
    Bottom,
    /// Left lane.
    Left,
    /// Right lane.
    Right,
}

/// Swipe direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwipeDirection {
    /// Left to right.
    #[default]
    LeftToRight,
    /// Right to left.
    RightToLeft,
    /// Top to bottom.
    TopToBottom,
    /// Bottom to top.
    BottomToTop,
}

impl SwipeDirection {
    /// `true` for left/right swipes.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }
}

/// Swipe travel distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwipeDistance {
    /// Short swipe.
    Short,
    /// Medium swipe.
    #[default]
    Medium,
    /// Long swipe.
    Long,
}

/// Swipe timing preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwipeSpeed {
    /// Use the intent's explicit timing fields.
    #[default]
    Custom,
    /// Fast preset.
    Fast,
    /// Normal preset.
    Normal,
    /// Slow preset.
    Slow,
}

/// A high-level interaction intent, compiled into one or more [`GestureStep`]s.
///
/// [`GestureStep`]: crate::GestureStep
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InteractionSpec {
    /// Interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Pause duration, or tap trailing frames when `frames_after` is not positive.
    pub frames: i32,
    /// Extra frames captured after the interaction.
    pub frames_after: i32,
    /// Tap point, or swipe lane.
    pub target: InteractionTarget,
    /// Swipe direction.
    pub direction: SwipeDirection,
    /// Swipe distance.
    pub distance: SwipeDistance,
    /// Swipe timing preset.
    pub speed: SwipeSpeed,
    /// Travel frames per waypoint when `speed` is `CUSTOM`.
    pub travel_frames: i32,
    /// Hold frames after pointer down when `speed` is `CUSTOM`.
    pub hold_start_frames: i32,
    /// Hold frames after pointer up when `speed` is `CUSTOM`.
    pub release_frames: i32,
}

impl Default for InteractionSpec {
    fn default() -> Self {
        Self {
            kind: InteractionKind::Pause,
            frames: 0,
            frames_after: 0,
            target: InteractionTarget::Center,
            direction: SwipeDirection::LeftToRight,
            distance: SwipeDistance::Medium,
            speed: SwipeSpeed::Custom,
            travel_frames: 8,
            hold_start_frames: 0,
            release_frames: 0,
        }
    }
}

impl InteractionSpec {
    /// A pause intent of `frames` frames.
    pub fn pause(frames: i32) -> Self {
        Self {
            kind: InteractionKind::Pause,
            frames,
            ..Self::default()
        }
    }

    /// A tap intent on `target` followed by `frames_after` frames.
    pub fn tap(target: InteractionTarget, frames_after: i32) -> Self {
        Self {
            kind: InteractionKind::Tap,
            target,
            frames_after,
            ..Self::default()
        }
    }

    /// A swipe intent using a timing preset.
    pub fn swipe(direction: SwipeDirection, distance: SwipeDistance, speed: SwipeSpeed) -> Self {
        Self {
            kind: InteractionKind::Swipe,
            direction,
            distance,
            speed,
            ..Self::default()
        }
    }
}
