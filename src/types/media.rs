use crate::error::ScrubError;

/// The playback element a scrubber drives.
///
/// The scrubber reads `duration` and `current_time` and writes positions
/// through one of the two seek primitives. Loading and decoding are owned by
/// the implementation.
pub trait MediaElement {
    /// Duration in seconds, `None` until metadata is loaded.
    fn duration(&self) -> Option<f64>;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Whether the low-latency, approximate `fast_seek` is available.
    fn supports_fast_seek(&self) -> bool;

    /// Approximate (key frame) seek.
    fn fast_seek(&mut self, time: f64) -> Result<(), ScrubError>;

    /// Frame-accurate seek.
    fn set_current_time(&mut self, time: f64) -> Result<(), ScrubError>;

    fn pause(&mut self) -> Result<(), ScrubError>;
}

/// No media loaded: nothing is known and every seek is a no-op.
impl<M: MediaElement> MediaElement for Option<M> {
    fn duration(&self) -> Option<f64> {
        self.as_ref().and_then(MediaElement::duration)
    }

    fn current_time(&self) -> f64 {
        self.as_ref().map_or(0.0, MediaElement::current_time)
    }

    fn supports_fast_seek(&self) -> bool {
        self.as_ref().is_some_and(MediaElement::supports_fast_seek)
    }

    fn fast_seek(&mut self, time: f64) -> Result<(), ScrubError> {
        match self {
            Some(media) => media.fast_seek(time),
            None => Ok(()),
        }
    }

    fn set_current_time(&mut self, time: f64) -> Result<(), ScrubError> {
        match self {
            Some(media) => media.set_current_time(time),
            None => Ok(()),
        }
    }

    fn pause(&mut self) -> Result<(), ScrubError> {
        match self {
            Some(media) => media.pause(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl MediaElement for Fixed {
        fn duration(&self) -> Option<f64> {
            Some(self.0)
        }
        fn current_time(&self) -> f64 {
            self.0 / 2.0
        }
        fn supports_fast_seek(&self) -> bool {
            true
        }
        fn fast_seek(&mut self, _time: f64) -> Result<(), ScrubError> {
            Ok(())
        }
        fn set_current_time(&mut self, _time: f64) -> Result<(), ScrubError> {
            Ok(())
        }
        fn pause(&mut self) -> Result<(), ScrubError> {
            Ok(())
        }
    }

    #[test]
    fn test_absent_media_knows_nothing() {
        let mut media: Option<Fixed> = None;
        assert_eq!(media.duration(), None);
        assert_eq!(media.current_time(), 0.0);
        assert!(!media.supports_fast_seek());
        assert!(media.fast_seek(3.0).is_ok());
        assert!(media.pause().is_ok());
    }

    #[test]
    fn test_present_media_delegates() {
        let media = Some(Fixed(8.0));
        assert_eq!(media.duration(), Some(8.0));
        assert_eq!(media.current_time(), 4.0);
        assert!(media.supports_fast_seek());
    }
}
