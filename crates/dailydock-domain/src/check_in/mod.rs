mod classifier;
mod gateway;
mod value_objects;


pub use classifier::{
    classify, classify_with, ClassificationRule, Matcher, RuleOutcome, CHECKIN_RULES,
};
pub use gateway::{
    CheckinGateway, CheckinResponse, ExchangeResponse, GatewayError, EXCHANGE_OK_CODE,
};
pub use value_objects::{AccountResult, CheckinOutcome, OutcomeCategory};
