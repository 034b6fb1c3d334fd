//! Audio cues
//!
//! Simulation events map onto four short sound cues. Playback goes through a
//! `CueSink` so the mapping and volume logic stay testable off the browser;
//! on the web each cue is an `HtmlAudioElement` rewound before every play.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player input applied an impulse
    Flap,
    /// A pair was passed
    Pass,
    /// Score reached a multiple of the milestone interval
    Milestone,
    /// Round-ending collision
    Hit,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Flap,
        SoundCue::Pass,
        SoundCue::Milestone,
        SoundCue::Hit,
    ];

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundCue::Flap),
            GameEvent::Passed { .. } => Some(SoundCue::Pass),
            GameEvent::Milestone { .. } => Some(SoundCue::Milestone),
            GameEvent::Hit { .. } => Some(SoundCue::Hit),
            GameEvent::Restarted => None,
        }
    }

    /// Sound file name inside the asset directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Flap => "flap.mp3",
            SoundCue::Pass => "pipe.mp3",
            SoundCue::Milestone => "onichiwa.mp3",
            SoundCue::Hit => "hit.mp3",
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundCue::Flap => 0,
            SoundCue::Pass => 1,
            SoundCue::Milestone => 2,
            SoundCue::Hit => 3,
        }
    }
}

/// Something that can actually make a cue audible
pub trait CueSink {
    /// Play `cue` from its start at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that only logs; used natively and when audio is unavailable
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("cue {:?} at volume {:.2}", cue, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: CueSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: CueSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volumes and mute state from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a single cue (silently dropped at zero volume)
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play the cue for every event, in order. Returns how many were played.
    pub fn dispatch(&mut self, events: &[GameEvent]) -> usize {
        if self.effective_volume() <= 0.0 {
            return 0;
        }
        let mut played = 0;
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
            played += 1;
        }
        played
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::HtmlAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{CueSink, SoundCue};

    /// One preloaded `<audio>` element per cue
    pub struct HtmlAudioSink {
        elements: [Option<HtmlAudioElement>; 4],
    }

    impl HtmlAudioSink {
        /// Create elements for every cue; `url_for` maps a cue to its source
        pub fn new(url_for: impl Fn(SoundCue) -> String) -> Self {
            let elements = SoundCue::ALL.map(|cue| {
                let url = url_for(cue);
                match HtmlAudioElement::new_with_src(&url) {
                    Ok(el) => {
                        el.set_preload("auto");
                        el.load();
                        Some(el)
                    }
                    Err(e) => {
                        log::warn!("Failed to create audio element for {}: {:?}", url, e);
                        None
                    }
                }
            });
            Self { elements }
        }
    }

    impl CueSink for HtmlAudioSink {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            let Some(el) = &self.elements[cue.index()] else {
                return;
            };
            // Rewind so rapid repeats restart the clip
            el.set_current_time(0.0);
            el.set_volume(volume as f64);
            // Autoplay may be refused before the first user gesture
            if let Err(e) = el.play() {
                log::debug!("Audio play rejected for {:?}: {:?}", cue, e);
            }
        }
    }
}
