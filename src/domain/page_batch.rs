use std::ops::Range;

/// Contiguous run of pages sent to the vision service in one request.
/// `start..end` are 0-based page indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBatch {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl PageBatch {
    pub fn pages(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// 1-based inclusive page range, e.g. `51-55`.
    pub fn display_range(&self) -> String {
        format!("{}-{}", self.start + 1, self.end)
    }
}

/// Splits `0..page_count` into ascending batches of at most `batch_size`
/// pages with no gaps or overlap.
pub fn partition_pages(page_count: usize, batch_size: usize) -> Vec<PageBatch> {
    let batch_size = batch_size.max(1);
    (0..page_count)
        .step_by(batch_size)
        .enumerate()
        .map(|(index, start)| PageBatch {
            index,
            start,
            end: (start + batch_size).min(page_count),
        })
        .collect()
}
