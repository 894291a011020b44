pub mod banner;
pub mod goal_card;
pub mod month_calendar;
