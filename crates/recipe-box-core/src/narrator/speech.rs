use crate::CoreResult;

/// Platform text-to-speech capability.
///
/// Fire-and-forget: `speak` queues an utterance and returns immediately,
/// `cancel` drops everything queued or playing. No completion is reported.
pub trait SpeechSynth {
    /// Whether the capability exists on this platform.
    fn is_available(&self) -> bool;

    /// Queue `text` for speaking.
    fn speak(&mut self, text: &str) -> CoreResult<()>;

    /// Stop the current utterance and clear the queue.
    fn cancel(&mut self) -> CoreResult<()>;
}

/// Speech backend for platforms without text-to-speech. Never speaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechSynth for NullSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str) -> CoreResult<()> {
        Ok(())
    }

    fn cancel(&mut self) -> CoreResult<()> {
        Ok(())
    }
}

impl<T: SpeechSynth + ?Sized> SpeechSynth for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn speak(&mut self, text: &str) -> CoreResult<()> {
        (**self).speak(text)
    }

    fn cancel(&mut self) -> CoreResult<()> {
        (**self).cancel()
    }
}
