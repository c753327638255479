//! Users and rewards.

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new(
        "user_rewards_details_rq",
        "/UserRewardsDetailsRQ",
        Category::Users,
        USER_REWARDS_DETAILS,
    )
    .title("User Rewards Details")
    .describe("Retrieve detailed information about users subscribed to rewards programs.")
    .results(&["UserRewardsDetails"]),
];

const USER_REWARDS_DETAILS: &[Param] = &[
    Param::list(
        "user_reward_ids",
        "List of user reward IDs (email addresses) to query",
        Item::string("User email address registered in rewards program").format(Format::Email),
    )
    .required()
    .wire("UserRewardId")
    .min_items(1)
    .max_items(100),
];
