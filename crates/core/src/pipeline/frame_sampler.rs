/// Decides which captured frames get landmark detection and gesture
/// interpretation. Every `every`-th frame is processed, starting with the
/// first one; the rest are only displayed.
pub struct FrameSampler {
    every: usize,
    frame_count: usize,
}

impl FrameSampler {
    pub fn new(every: usize) -> Result<Self, &'static str> {
        if every < 1 {
            return Err("process interval must be >= 1");
        }
        Ok(Self {
            every,
            frame_count: 0,
        })
    }

    pub fn every(&self) -> usize {
        self.every
    }

    /// Advances the counter and reports whether this frame is sampled.
    pub fn should_process(&mut self) -> bool {
        let sampled = self.frame_count % self.every == 0;
        self.frame_count += 1;
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_rejects_zero_interval() {
        assert!(FrameSampler::new(0).is_err());
    }

    #[rstest]
    #[case::every_frame(1, 10, 10)]
    #[case::every_fifth(5, 10, 2)]
    #[case::every_fifth_partial(5, 11, 3)]
    #[case::interval_longer_than_run(30, 10, 1)]
    fn test_sampled_count(#[case] every: usize, #[case] frames: usize, #[case] expected: usize) {
        let mut sampler = FrameSampler::new(every).unwrap();
        let sampled = (0..frames).filter(|_| sampler.should_process()).count();
        assert_eq!(sampled, expected);
    }

    #[test]
    fn test_first_frame_is_sampled() {
        let mut sampler = FrameSampler::new(5).unwrap();
        let pattern: Vec<bool> = (0..6).map(|_| sampler.should_process()).collect();
        assert_eq!(pattern, vec![true, false, false, false, false, true]);
    }
}
