use crate::model::Resource;
use crate::service::list::ListController;
use crate::state::CategoryFilter;

impl ListController<Resource> {
    pub fn category_filter(&self) -> CategoryFilter {
        self.store()
            .get_as(CategoryFilter::PATH)
            .unwrap_or_default()
    }

    pub fn set_category_filter(&self, selected: CategoryFilter) {
        self.store().set(CategoryFilter::PATH, selected);
    }

    /// Rows matching both the keyword and the category selector.
    pub fn visible_resources(&self) -> Vec<Resource> {
        let selected = self.category_filter();
        self.visible()
            .into_iter()
            .filter(|r| selected.admits(r.category_id))
            .collect()
    }

    /// Display name of a resource's category, `-` when unknown.
    pub fn category_name(&self, resource: &Resource) -> String {
        resource.category_name(&self.state().lookup).to_string()
    }
}
