pub(crate) mod post_form;
pub(crate) mod post_list;
