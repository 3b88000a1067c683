pub mod elevenlabs;
pub mod provider;
pub mod synthesizer;
pub mod voice;

pub use elevenlabs::{ElevenLabsClient, ElevenLabsConfig};
pub use provider::SpeechProvider;
pub use synthesizer::{AdmissionPolicy, SpeechSynthesizer, SynthesisOptions};
pub use voice::{select_voice, Voice};
