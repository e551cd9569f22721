pub mod filter;
pub mod types;

pub use filter::{
    MemberQuery, ITEMS_PER_PAGE, filter_and_paginate, plan_options, search_by_name, select, stats,
};
pub use types::{AttendanceEntry, Member, MemberPage, MemberStat, MemberUpdate};
