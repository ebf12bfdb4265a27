//! Named locators for the target site. Kept in one place because the fake
//! driver in the test harness keys its scripted pages off the same values.

use super::driver::Locator;

pub fn logged_in_marker() -> Locator {
    Locator::css("#profile-nav-item")
}

pub fn captcha_marker() -> Locator {
    Locator::css("div.captcha-internal")
}

pub fn result_card_title() -> Locator {
    Locator::css("span.entity-result__title-text a.app-aware-link")
}

pub fn about_tab() -> Locator {
    Locator::xpath("//a[contains(@href, '/about/')]")
}

pub fn about_section_links() -> Locator {
    Locator::css("section.org-page-details__definition-section a")
}

pub fn employee_count() -> Locator {
    Locator::xpath("//*[contains(text(), 'employees') or contains(text(), 'employee')]")
}

pub fn jobs_tab() -> Locator {
    Locator::xpath("//a[contains(@href, '/jobs/')]")
}

pub fn jobs_section() -> Locator {
    Locator::css("section.jobs-tab__content")
}

pub fn posts_tab() -> Locator {
    Locator::xpath("//a[contains(@href, '/posts/')]")
}

pub fn post_card() -> Locator {
    Locator::css("div.feed-shared-update-v2")
}

pub fn people_tab() -> Locator {
    Locator::xpath("//a[contains(@href, '/people/')]")
}

pub fn people_card_name() -> Locator {
    Locator::css("li.org-people-profiles-module__profile-item div.t-16.t-black.t-bold")
}

pub fn people_card_title() -> Locator {
    Locator::css("li.org-people-profiles-module__profile-item div.t-14.t-black--light.t-normal")
}

pub fn people_card_link() -> Locator {
    Locator::css("li.org-people-profiles-module__profile-item a")
}

pub fn person_about() -> Locator {
    Locator::css("section.pv-about-section, div.display-flex.mt2 ul.pv-text-details__left-panel")
}

pub fn about_see_more() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'See more about') or contains(text(), 'See more')]")
}

pub fn experience_section() -> Locator {
    Locator::css("section.pv-profile-section.experience-section, section#experience")
}

pub fn experience_see_more() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'See more experience')]")
}

pub fn already_connected_marker() -> Locator {
    Locator::xpath("//span[contains(text(), 'Message')]")
}

pub fn connect_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Connect') or contains(text(), 'Connect')]")
}

pub fn add_note_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Add a note') or contains(text(), 'Add a note')]")
}

pub fn note_box() -> Locator {
    Locator::css("#custom-message")
}

pub fn send_now_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Send now') or contains(text(), 'Send')]")
}

pub fn comment_button() -> Locator {
    Locator::xpath("//div[contains(@class, 'feed-shared-update-v2')]//button[contains(@aria-label, 'Comment')]")
}

pub fn comment_box() -> Locator {
    Locator::css("div.comments-comment-box__editor")
}

pub fn post_comment_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Post comment') or contains(text(), 'Post')]")
}

pub fn message_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Message') or contains(text(), 'Message')]")
}

pub fn message_box() -> Locator {
    Locator::css("div.msg-form__contenteditable")
}

pub fn send_message_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Send')]")
}

pub fn next_page_button() -> Locator {
    Locator::xpath("//button[contains(@aria-label, 'Next')]")
}

/// Harmless hover/misclick targets for the behavior simulator.
pub fn cosmetic_targets() -> Locator {
    Locator::css("a, button, img, div")
}

pub fn misclick_targets() -> Locator {
    Locator::css("a, button")
}
