//=========================================================================
// Id Allocator
//=========================================================================
//
// Recycled integer ids for scene nodes.
//
// Ids count up from 0 and wrap back to 0 after `max`, so they are only
// unique among nodes that are live at the same time.
//
//=========================================================================

#[derive(Debug, Clone)]
pub struct IdAllocator {
    last: Option<u32>,
    max: u32,
}

impl IdAllocator {
    pub fn new(max: u32) -> Self {
        Self { last: None, max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn next_id(&mut self) -> u32 {
        let id = match self.last {
            Some(last) if last < self.max => last + 1,
            _ => 0,
        };
        self.last = Some(id);
        id
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let mut ids = IdAllocator::new(10);
        assert_eq!(ids.next_id(), 0);
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn wraps_after_max() {
        let mut ids = IdAllocator::new(2);
        let issued: Vec<u32> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(issued, vec![0, 1, 2, 0, 1]);
    }
}
