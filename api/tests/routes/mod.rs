mod assessment_flow_test;
mod auth_test;
mod courses_test;
mod guards_test;
mod health_test;
mod users_test;
