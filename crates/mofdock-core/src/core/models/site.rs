use serde::Deserialize;

/// A group of ligand atoms that one metal cluster is docked onto.
///
/// Indices are 0-based and refer to the ligand structure. The list is kept in
/// the order the caller supplied it; duplicates and overlap with other sites
/// are allowed and not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct BondingSite {
    indices: Vec<usize>,
}

impl BondingSite {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Returns the first index that does not fit a structure of `len` atoms.
    pub fn first_out_of_range(&self, len: usize) -> Option<usize> {
        self.indices.iter().copied().find(|&i| i >= len)
    }
}

impl From<Vec<usize>> for BondingSite {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

impl FromIterator<usize> for BondingSite {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_order_and_duplicates() {
        let site = BondingSite::new(vec![4, 1, 4]);
        assert_eq!(site.indices(), &[4, 1, 4]);
        assert_eq!(site.len(), 3);
        assert!(site.contains(1));
        assert!(!site.contains(0));
    }

    #[test]
    fn first_out_of_range_finds_offending_index() {
        let site: BondingSite = vec![0, 7, 9].into();
        assert_eq!(site.first_out_of_range(10), None);
        assert_eq!(site.first_out_of_range(8), Some(9));
        assert_eq!(site.first_out_of_range(5), Some(7));
    }

    #[test]
    fn deserializes_from_plain_index_list() {
        #[derive(Deserialize)]
        struct Doc {
            sites: Vec<BondingSite>,
        }
        let doc: Doc = toml::from_str("sites = [[0, 1], [5]]").unwrap();
        assert_eq!(doc.sites, vec![BondingSite::new(vec![0, 1]), BondingSite::new(vec![5])]);
    }

    #[test]
    fn empty_site_reports_empty() {
        let site: BondingSite = std::iter::empty().collect();
        assert!(site.is_empty());
    }
}
