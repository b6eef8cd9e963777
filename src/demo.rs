//! Built-in sample pair for the `demo` command

pub const DEMO_JOB_SOURCE: &str = "sample: Cloud AWS Engineer posting";
pub const DEMO_RESUME_SOURCE: &str = "sample: Senior Data Engineer resume";

pub const DEMO_JOB: &str = "\
Cloud AWS Engineer

About the role
You will own the platform our product teams deploy onto, from network design to on-call.

Responsibilities
- Design and operate AWS infrastructure with Terraform
- Run containerised services on Kubernetes and Docker
- Write internal tooling in Go and Python
- Operate PostgreSQL and MySQL databases, including backups and upgrades
- Build dashboards and alerts in CloudWatch and Datadog
- Maintain delivery pipelines in GitLab and Jenkins

Requirements
- 5+ years of experience in cloud infrastructure
- AWS certification required
";

pub const DEMO_RESUME: &str = "\
Senior Data Engineer

Summary
Data engineer with eight years building batch and streaming platforms for analytics teams.

Experience
- Built ingestion pipelines in Python and Pandas feeding Snowflake and PostgreSQL
- Ran Spark jobs on Databricks over Azure storage; tuned Kafka consumers for streaming loads
- Scheduled workflows with Airflow and packaged jobs with Docker
- Modelled reporting tables in SQL and published Power BI dashboards
- Version control with Git and GitHub, reviewing pull requests for a team of six
";
