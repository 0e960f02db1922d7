//! In-memory search, sort and pagination for the admin tables.

use std::cmp::Ordering;

use serde::Deserialize;

use tcu_types::models::{MessageInfo, User};

use crate::dates::parse_timestamp;

pub const PAGE_SIZE: usize = 8;
const PAGE_BUTTONS: usize = 5;

/// `?q=&page=&sort=` on the list screens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    #[serde(default)]
    pub sort: String,
}

impl ListParams {
    pub fn query(&self) -> &str {
        self.q.trim()
    }
}

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn filter_messages(messages: &[MessageInfo], query: &str) -> Vec<MessageInfo> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return messages.to_vec();
    }
    messages
        .iter()
        .filter(|m| {
            contains(&m.full_name(), &needle)
                || contains(&m.email, &needle)
                || contains(&m.company_name, &needle)
                || contains(&m.country, &needle)
        })
        .cloned()
        .collect()
}

pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| contains(&u.name, &needle) || contains(&u.email, &needle) || contains(&u.id, &needle))
        .cloned()
        .collect()
}

fn by_created(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageSort {
    #[default]
    Newest,
    Oldest,
    Name,
    Unread,
}

impl MessageSort {
    pub const ALL: [MessageSort; 4] =
        [MessageSort::Newest, MessageSort::Oldest, MessageSort::Name, MessageSort::Unread];

    pub fn parse(value: &str) -> Self {
        match value {
            "oldest" => MessageSort::Oldest,
            "name" => MessageSort::Name,
            "unread" => MessageSort::Unread,
            _ => MessageSort::Newest,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MessageSort::Newest => "newest",
            MessageSort::Oldest => "oldest",
            MessageSort::Name => "name",
            MessageSort::Unread => "unread",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MessageSort::Newest => "Newest first",
            MessageSort::Oldest => "Oldest first",
            MessageSort::Name => "Name",
            MessageSort::Unread => "Unread first",
        }
    }
}

/// Stable sort, so equal keys keep the API's order.
pub fn sort_messages(messages: &mut [MessageInfo], sort: MessageSort) {
    match sort {
        MessageSort::Newest => messages.sort_by(|a, b| by_created(&b.created_at, &a.created_at)),
        MessageSort::Oldest => messages.sort_by(|a, b| by_created(&a.created_at, &b.created_at)),
        MessageSort::Name => {
            messages.sort_by_key(|m| m.full_name().to_lowercase());
        }
        MessageSort::Unread => messages.sort_by(|a, b| {
            a.read.cmp(&b.read).then_with(|| by_created(&b.created_at, &a.created_at))
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSort {
    #[default]
    Name,
    Newest,
    Oldest,
    Role,
}

impl UserSort {
    pub const ALL: [UserSort; 4] = [UserSort::Name, UserSort::Newest, UserSort::Oldest, UserSort::Role];

    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => UserSort::Newest,
            "oldest" => UserSort::Oldest,
            "role" => UserSort::Role,
            _ => UserSort::Name,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            UserSort::Name => "name",
            UserSort::Newest => "newest",
            UserSort::Oldest => "oldest",
            UserSort::Role => "role",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserSort::Name => "Name",
            UserSort::Newest => "Newest first",
            UserSort::Oldest => "Oldest first",
            UserSort::Role => "Role",
        }
    }
}

pub fn sort_users(users: &mut [User], sort: UserSort) {
    match sort {
        UserSort::Name => users.sort_by_key(|u| u.name.to_lowercase()),
        UserSort::Newest => users.sort_by(|a, b| by_created(&b.created_at, &a.created_at)),
        UserSort::Oldest => users.sort_by(|a, b| by_created(&a.created_at, &b.created_at)),
        UserSort::Role => users.sort_by(|a, b| {
            a.role.cmp(&b.role).then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped to the available pages.
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Zero-based index of the first row, for the "No." column.
    pub fn offset(&self) -> usize {
        (self.page - 1) * PAGE_SIZE
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Show 9 to 16 of 20"; `None` for an empty list.
    pub fn summary(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        let first = self.offset() + 1;
        let last = (self.page * PAGE_SIZE).min(self.total);
        Some(format!("Show {} to {} of {}", first, last, self.total))
    }

    pub fn window(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }
}

pub fn paginate<T: Clone>(items: &[T], requested: usize) -> Page<T> {
    let total = items.len();
    let total_pages = total.div_ceil(PAGE_SIZE);
    let page = requested.clamp(1, total_pages.max(1));
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    Page { items: items[start.min(end)..end].to_vec(), page, total_pages, total }
}

/// Page buttons to show: at most five, centred on the current page when
/// possible.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_BUTTONS {
        return (1..=total_pages).collect();
    }
    let first = if current <= 3 {
        1
    } else if current + 2 >= total_pages {
        total_pages - PAGE_BUTTONS + 1
    } else {
        current - 2
    };
    (first..first + PAGE_BUTTONS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, first: &str, company: &str, read: bool, created: &str) -> MessageInfo {
        MessageInfo {
            id: id.into(),
            first_name: first.into(),
            last_name: "Tun".into(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "+95912345".into(),
            company_name: company.into(),
            country: "Myanmar".into(),
            job_title: "Install".into(),
            job_details: None,
            read,
            created_at: created.into(),
        }
    }

    fn user(id: &str, name: &str, role: &str, created: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{}@tcu.test", name.to_lowercase()),
            role: role.into(),
            created_at: created.into(),
        }
    }

    #[test]
    fn message_filter_matches_name_email_company_country() {
        let list = vec![
            msg("1", "Aye", "Shwe Co", false, "20250101000000"),
            msg("2", "Myo", "Golden Ltd", true, "20250102000000"),
        ];
        assert_eq!(filter_messages(&list, "aye tun").len(), 1);
        assert_eq!(filter_messages(&list, "MYO@").len(), 1);
        assert_eq!(filter_messages(&list, "golden")[0].id, "2");
        assert_eq!(filter_messages(&list, "myanmar").len(), 2);
        assert_eq!(filter_messages(&list, "   ").len(), 2);
        assert!(filter_messages(&list, "nobody").is_empty());
    }

    #[test]
    fn user_filter_matches_id() {
        let users = vec![user("abc-1", "Zaw", "1", "20250101"), user("xyz-2", "Hla", "2", "20250102")];
        assert_eq!(filter_users(&users, "XYZ")[0].name, "Hla");
        assert_eq!(filter_users(&users, "zaw@tcu").len(), 1);
    }

    #[test]
    fn message_sorts() {
        let mut list = vec![
            msg("1", "Cho", "A", true, "20250102000000"),
            msg("2", "Aye", "B", false, "20250101000000"),
            msg("3", "Bo", "C", false, "20250103000000"),
        ];
        sort_messages(&mut list, MessageSort::Newest);
        assert_eq!(ids(&list), ["3", "1", "2"]);
        sort_messages(&mut list, MessageSort::Oldest);
        assert_eq!(ids(&list), ["2", "1", "3"]);
        sort_messages(&mut list, MessageSort::Name);
        assert_eq!(ids(&list), ["2", "3", "1"]);
        sort_messages(&mut list, MessageSort::Unread);
        assert_eq!(ids(&list), ["3", "2", "1"]);
    }

    fn ids(list: &[MessageInfo]) -> Vec<&str> {
        list.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn user_sorts() {
        let mut users = vec![
            user("1", "zaw", "2", "20250301"),
            user("2", "Aung", "2", "20250101"),
            user("3", "Mya", "1", "20250201"),
        ];
        sort_users(&mut users, UserSort::Name);
        assert_eq!(users[0].name, "Aung");
        sort_users(&mut users, UserSort::Newest);
        assert_eq!(users[0].name, "zaw");
        sort_users(&mut users, UserSort::Role);
        assert_eq!(users.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), ["3", "2", "1"]);
    }

    #[test]
    fn sort_parse_falls_back_to_default() {
        assert_eq!(MessageSort::parse("bogus"), MessageSort::Newest);
        assert_eq!(UserSort::parse(""), UserSort::Name);
        for s in MessageSort::ALL {
            assert_eq!(MessageSort::parse(s.key()), s);
        }
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (1..=20).collect();
        let page = paginate(&items, 2);
        assert_eq!(page.items, (9..=16).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.offset(), 8);
        assert_eq!(page.summary().as_deref(), Some("Show 9 to 16 of 20"));

        let last = paginate(&items, 99);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![17, 18, 19, 20]);
        assert_eq!(last.summary().as_deref(), Some("Show 17 to 20 of 20"));
        assert!(!last.has_next());
        assert!(last.has_prev());

        assert_eq!(paginate(&items, 0).page, 1);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate::<u32>(&[], 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), None);
        assert!(page.window().is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn page_window_positions() {
        assert_eq!(page_window(2, 4), vec![1, 2, 3, 4]);
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }
}
