//! The provisioning orchestrator

use crate::error::{OperationError, ProvisionError};
use crate::step::{Step, StepReport};
use siteforge_core::{Site, Transition, derive_slug, seed, transition};
use siteforge_providers::{
    BuildConfig, HostingProvider, ProviderError, RepositoryProvider, RetryConfig, SourceBinding,
    with_retry,
};
use siteforge_store::SiteStore;
use std::sync::Arc;

/// Branch every hosting project builds from
const PRODUCTION_BRANCH: &str = "main";

/// Fixed build configuration, identical for every site.
///
/// Never client-configurable: uniform build semantics are what make a
/// seeded repository deployable without per-site setup.
fn fixed_build_config() -> BuildConfig {
    BuildConfig {
        build_command: "hugo --minify".to_string(),
        output_dir: "public".to_string(),
        root_dir: String::new(),
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
    /// Account owning the created repositories at the source host; the
    /// hosting project's source binding points back at it.
    pub repo_owner: String,

    /// Retry policy for idempotent remote steps
    pub retry: RetryConfig,
}

/// Request to create a site
#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub owner_id: String,
    pub contact_email: String,
    pub live_domain: Option<String>,
    pub monthly_fee: f64,
    pub notes: String,
}

/// Options for [`Provisioner::delete_site`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    pub delete_repository: bool,
    pub delete_hosting_project: bool,
}

/// A successful lifecycle operation: the resulting record plus the
/// report of every step that ran.
#[derive(Debug)]
pub struct SiteOutcome {
    pub site: Site,
    pub steps: Vec<StepReport>,
}

/// Result of a delete: external deletions are best-effort, so their
/// failures land in `steps` rather than aborting the operation.
#[derive(Debug)]
pub struct DeleteReport {
    pub removed: Site,
    pub steps: Vec<StepReport>,
}

impl DeleteReport {
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| s.success)
    }
}

/// Composes the template seeder, the provider clients, and the record
/// store into the five lifecycle operations. All collaborators arrive
/// through the constructor, so tests substitute fakes.
pub struct Provisioner {
    repos: Arc<dyn RepositoryProvider>,
    hosting: Arc<dyn HostingProvider>,
    store: Arc<dyn SiteStore>,
    config: ProvisionerConfig,
}

impl Provisioner {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        hosting: Arc<dyn HostingProvider>,
        store: Arc<dyn SiteStore>,
        config: ProvisionerConfig,
    ) -> Self {
        Self {
            repos,
            hosting,
            store,
            config,
        }
    }

    /// Create a site end to end: repository, starter content, hosting
    /// project, record.
    ///
    /// No automatic compensation on partial failure: a repository created
    /// before a later step failed is left in place, and the error names
    /// the failed step so an operator can resume or clean up.
    pub async fn create_site(&self, request: NewSite) -> Result<SiteOutcome, ProvisionError> {
        let mut steps = Vec::new();

        // Step 1: validate input and derive the repository slug.
        if request.monthly_fee < 0.0 {
            return Err(fail(
                steps,
                Step::ValidateRequest,
                siteforge_core::CoreError::Validation(format!(
                    "monthly fee must be non-negative, got {}",
                    request.monthly_fee
                ))
                .into(),
            ));
        }
        let slug = match derive_slug(&request.name) {
            Ok(slug) => slug,
            Err(e) => return Err(fail(steps, Step::ValidateRequest, e.into())),
        };
        steps.push(StepReport::success(
            Step::ValidateRequest,
            format!("derived repository slug {slug}"),
        ));

        // Step 2: create the repository. Creation is not idempotent, so a
        // transient failure is not blindly retried; the slug is probed
        // first to learn whether the ambiguous call actually landed.
        let description = format!("Website for {} - managed by siteforge", request.name);
        match self.repos.create_repository(&slug, &description).await {
            Ok(_) => {}
            Err(e) if e.is_transient() => match self.repos.repository_exists(&slug).await {
                Ok(true) => {
                    tracing::warn!(
                        slug,
                        "Repository exists after ambiguous creation failure, continuing"
                    );
                }
                _ => return Err(fail(steps, Step::CreateRepository, e.into())),
            },
            // A slug collision is not retried automatically.
            Err(e) => return Err(fail(steps, Step::CreateRepository, e.into())),
        }
        steps.push(StepReport::success(
            Step::CreateRepository,
            format!("created repository {slug}"),
        ));

        // Step 3: seed the starter template. Upserts are idempotent, so
        // each file write retries on transient failure.
        let files = match seed(&slug, &request.name) {
            Ok(files) => files,
            Err(e) => return Err(fail(steps, Step::SeedTemplate, e.into())),
        };
        for file in &files {
            let message = format!("Add {}", file.path);
            let result = with_retry(&self.config.retry, "put_file", || {
                self.repos
                    .put_file(&slug, &file.path, &file.content, &message)
            })
            .await;
            if let Err(e) = result {
                return Err(fail(steps, Step::SeedTemplate, e.into()));
            }
        }
        steps.push(StepReport::success(
            Step::SeedTemplate,
            format!("seeded {} starter files", files.len()),
        ));

        // Step 4: create the hosting project bound to the repository.
        let project = match self.create_hosting_project(&slug).await {
            Ok(project) => project,
            Err(e) => return Err(fail(steps, Step::CreateHostingProject, e.into())),
        };
        steps.push(StepReport::success(
            Step::CreateHostingProject,
            format!("created hosting project {} ({})", project.name, project.preview_domain),
        ));

        // Step 5: record the result, in state draft.
        let draft = {
            let mut site = Site::new_draft(
                uuid::Uuid::new_v4().to_string(),
                &request.name,
                &request.owner_id,
                &request.contact_email,
                &slug,
                request.live_domain.clone(),
            );
            site.monthly_fee = request.monthly_fee;
            site.notes = request.notes.clone();
            site
        };
        let site = match transition::apply(
            &draft,
            &Transition::Provision {
                staging_domain: project.preview_domain.clone(),
                hosting_project_ref: project.id.clone(),
            },
        ) {
            Ok(site) => site,
            Err(e) => return Err(fail(steps, Step::ApplyTransition, e.into())),
        };
        steps.push(StepReport::success(Step::ApplyTransition, "applied provision"));

        if let Err(e) = self.store.insert(&site).await {
            return Err(fail(steps, Step::PersistRecord, e.into()));
        }
        steps.push(StepReport::success(
            Step::PersistRecord,
            format!("persisted site {}", site.id),
        ));

        tracing::info!(site_id = %site.id, slug, "Site created");
        Ok(SiteOutcome { site, steps })
    }

    /// Promote a site to the staged preview, provisioning the hosting
    /// project first if an earlier create stopped before step 4.
    pub async fn publish_to_staging(&self, site_id: &str) -> Result<SiteOutcome, ProvisionError> {
        let mut steps = Vec::new();
        let mut site = self.load(site_id, &mut steps).await?;

        if !site.is_provisioned() {
            let project = match self.create_hosting_project(&site.repository_slug).await {
                Ok(project) => project,
                Err(e) => return Err(fail(steps, Step::CreateHostingProject, e.into())),
            };
            steps.push(StepReport::success(
                Step::CreateHostingProject,
                format!("created hosting project {}", project.name),
            ));

            site = match transition::apply(
                &site,
                &Transition::Provision {
                    staging_domain: project.preview_domain,
                    hosting_project_ref: project.id,
                },
            ) {
                Ok(site) => site,
                Err(e) => return Err(fail(steps, Step::ApplyTransition, e.into())),
            };
        }

        let site = match transition::apply(&site, &Transition::PromoteToPreview) {
            Ok(site) => site,
            Err(e) => return Err(fail(steps, Step::ApplyTransition, e.into())),
        };
        steps.push(StepReport::success(Step::ApplyTransition, "applied promote_to_preview"));

        self.persist(site, steps).await
    }

    /// Bind the custom domain and flip the site public.
    ///
    /// The live domain must be known before any remote call is made:
    /// either already on the record or supplied here by the operator.
    pub async fn publish_to_live(
        &self,
        site_id: &str,
        live_domain: Option<String>,
    ) -> Result<SiteOutcome, ProvisionError> {
        let mut steps = Vec::new();
        let mut site = self.load(site_id, &mut steps).await?;

        if let Some(domain) = live_domain {
            site.live_domain = Some(domain);
        }

        // Precondition check up front: a site without a live domain fails
        // here, before the hosting provider is contacted.
        let promoted = match transition::apply(&site, &Transition::PromoteToLive) {
            Ok(site) => site,
            Err(e) => return Err(fail(steps, Step::ApplyTransition, e.into())),
        };
        steps.push(StepReport::success(Step::ApplyTransition, "applied promote_to_live"));

        let domain = promoted
            .live_domain
            .clone()
            .unwrap_or_default();
        let attach = with_retry(&self.config.retry, "attach_custom_domain", || {
            self.hosting
                .attach_custom_domain(&promoted.repository_slug, &domain)
        })
        .await;
        if let Err(e) = attach {
            return Err(fail(steps, Step::AttachDomain, e.into()));
        }
        steps.push(StepReport::success(
            Step::AttachDomain,
            format!("attached custom domain {domain}"),
        ));

        self.persist(promoted, steps).await
    }

    /// Hide the site from public view. No remote calls: the hosting
    /// project and domain binding remain intact for a later republish.
    pub async fn unpublish(
        &self,
        site_id: &str,
        reason: &str,
    ) -> Result<SiteOutcome, ProvisionError> {
        let mut steps = Vec::new();
        let site = self.load(site_id, &mut steps).await?;

        let site = match transition::apply(&site, &Transition::Unpublish { reason: reason.to_string() }) {
            Ok(site) => site,
            Err(e) => return Err(fail(steps, Step::ApplyTransition, e.into())),
        };
        steps.push(StepReport::success(Step::ApplyTransition, "applied unpublish"));

        self.persist(site, steps).await
    }

    /// Remove the record, optionally deleting the external resources.
    ///
    /// Each requested external deletion is attempted independently and
    /// best-effort; record deletion is mandatory and always runs last. An
    /// orphaned external resource is a lower operational risk than a
    /// record that cannot be removed because an unrelated call failed.
    pub async fn delete_site(
        &self,
        site_id: &str,
        options: DeleteOptions,
    ) -> Result<DeleteReport, ProvisionError> {
        let mut steps = Vec::new();
        let site = self.load(site_id, &mut steps).await?;

        if options.delete_hosting_project {
            let result = with_retry(&self.config.retry, "delete_project", || {
                self.hosting.delete_project(&site.repository_slug)
            })
            .await;
            steps.push(cleanup_report(
                Step::DeleteHostingProject,
                &site.repository_slug,
                result,
            ));
        }

        if options.delete_repository {
            let result = with_retry(&self.config.retry, "delete_repository", || {
                self.repos.delete_repository(&site.repository_slug)
            })
            .await;
            steps.push(cleanup_report(
                Step::DeleteRepository,
                &site.repository_slug,
                result,
            ));
        }

        let removed = match self.store.remove(&site.id).await {
            Ok(site) => site,
            Err(e) => return Err(fail(steps, Step::DeleteRecord, e.into())),
        };
        steps.push(StepReport::success(
            Step::DeleteRecord,
            format!("removed site {}", removed.id),
        ));

        tracing::info!(site_id = %removed.id, "Site deleted");
        Ok(DeleteReport { removed, steps })
    }

    async fn create_hosting_project(
        &self,
        slug: &str,
    ) -> Result<siteforge_providers::HostingProject, ProviderError> {
        let source = SourceBinding {
            owner: self.config.repo_owner.clone(),
            repository: slug.to_string(),
            production_branch: PRODUCTION_BRANCH.to_string(),
        };
        self.hosting
            .create_project(slug, &source, &fixed_build_config())
            .await
    }

    async fn load(
        &self,
        site_id: &str,
        steps: &mut Vec<StepReport>,
    ) -> Result<Site, ProvisionError> {
        match self.store.get(site_id).await {
            Ok(Some(site)) => {
                steps.push(StepReport::success(
                    Step::LoadRecord,
                    format!("loaded site {site_id}"),
                ));
                Ok(site)
            }
            Ok(None) => Err(fail(
                std::mem::take(steps),
                Step::LoadRecord,
                siteforge_store::StoreError::NotFound(site_id.to_string()).into(),
            )),
            Err(e) => Err(fail(std::mem::take(steps), Step::LoadRecord, e.into())),
        }
    }

    async fn persist(
        &self,
        site: Site,
        mut steps: Vec<StepReport>,
    ) -> Result<SiteOutcome, ProvisionError> {
        if let Err(e) = self.store.update(&site).await {
            return Err(fail(steps, Step::PersistRecord, e.into()));
        }
        steps.push(StepReport::success(
            Step::PersistRecord,
            format!("persisted site {}", site.id),
        ));
        Ok(SiteOutcome { site, steps })
    }
}

fn fail(mut steps: Vec<StepReport>, step: Step, source: OperationError) -> ProvisionError {
    tracing::warn!(%step, error = %source, "Operation step failed");
    steps.push(StepReport::failure(step, &source));
    ProvisionError { step, steps, source }
}

fn cleanup_report(
    step: Step,
    slug: &str,
    result: Result<(), ProviderError>,
) -> StepReport {
    match result {
        Ok(()) => StepReport::success(step, format!("deleted {slug}")),
        // Already absent counts as success for idempotent cleanup.
        Err(e) if e.is_not_found() => {
            StepReport::success(step, format!("{slug} already absent"))
        }
        Err(e) => StepReport::failure(step, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use siteforge_core::StagingStatus;
    use siteforge_providers::{HostingProject, RepoHandle};
    use siteforge_store::StoreError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeRepos {
        created: Mutex<Vec<String>>,
        files: Mutex<Vec<(String, String)>>,
        deleted: Mutex<Vec<String>>,
        create_error: Mutex<Option<ProviderError>>,
        exists: AtomicBool,
        put_attempts: AtomicU32,
        put_failures_remaining: AtomicU32,
        delete_error: Mutex<Option<ProviderError>>,
    }

    #[async_trait]
    impl RepositoryProvider for FakeRepos {
        async fn create_repository(
            &self,
            name: &str,
            _description: &str,
        ) -> Result<RepoHandle, ProviderError> {
            if let Some(e) = self.create_error.lock().unwrap().take() {
                return Err(e);
            }
            self.created.lock().unwrap().push(name.to_string());
            Ok(RepoHandle {
                name: name.to_string(),
                html_url: format!("https://repos.example/{name}"),
                clone_url: format!("https://repos.example/{name}.git"),
                default_branch: "main".to_string(),
            })
        }

        async fn repository_exists(&self, _name: &str) -> Result<bool, ProviderError> {
            Ok(self.exists.load(Ordering::SeqCst))
        }

        async fn put_file(
            &self,
            repo: &str,
            path: &str,
            _content: &str,
            _commit_message: &str,
        ) -> Result<(), ProviderError> {
            self.put_attempts.fetch_add(1, Ordering::SeqCst);
            let remaining = self.put_failures_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.put_failures_remaining.store(remaining - 1, Ordering::SeqCst);
                return Err(ProviderError::Transport("connection reset".to_string()));
            }
            self.files
                .lock()
                .unwrap()
                .push((repo.to_string(), path.to_string()));
            Ok(())
        }

        async fn delete_repository(&self, name: &str) -> Result<(), ProviderError> {
            if let Some(e) = self.delete_error.lock().unwrap().take() {
                return Err(e);
            }
            self.deleted.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeHosting {
        projects: Mutex<Vec<String>>,
        domains: Mutex<Vec<(String, String)>>,
        deleted: Mutex<Vec<String>>,
        create_error: Mutex<Option<ProviderError>>,
        attach_error: Mutex<Option<ProviderError>>,
        delete_error: Mutex<Option<ProviderError>>,
    }

    #[async_trait]
    impl HostingProvider for FakeHosting {
        async fn create_project(
            &self,
            name: &str,
            source: &SourceBinding,
            build: &BuildConfig,
        ) -> Result<HostingProject, ProviderError> {
            assert_eq!(source.repository, name);
            assert_eq!(build.build_command, "hugo --minify");
            if let Some(e) = self.create_error.lock().unwrap().take() {
                return Err(e);
            }
            self.projects.lock().unwrap().push(name.to_string());
            Ok(HostingProject {
                id: format!("proj-{name}"),
                name: name.to_string(),
                preview_domain: format!("{name}.pages.dev"),
            })
        }

        async fn attach_custom_domain(
            &self,
            project_name: &str,
            domain: &str,
        ) -> Result<(), ProviderError> {
            if let Some(e) = self.attach_error.lock().unwrap().take() {
                return Err(e);
            }
            self.domains
                .lock()
                .unwrap()
                .push((project_name.to_string(), domain.to_string()));
            Ok(())
        }

        async fn delete_project(&self, project_name: &str) -> Result<(), ProviderError> {
            if let Some(e) = self.delete_error.lock().unwrap().take() {
                return Err(e);
            }
            self.deleted.lock().unwrap().push(project_name.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        sites: Mutex<HashMap<String, Site>>,
    }

    #[async_trait]
    impl SiteStore for FakeStore {
        async fn insert(&self, site: &Site) -> Result<(), StoreError> {
            let mut sites = self.sites.lock().unwrap();
            if sites.contains_key(&site.id) {
                return Err(StoreError::Conflict(format!("id {} taken", site.id)));
            }
            if sites
                .values()
                .any(|s| s.repository_slug == site.repository_slug)
            {
                return Err(StoreError::Conflict(format!(
                    "slug {} taken",
                    site.repository_slug
                )));
            }
            sites.insert(site.id.clone(), site.clone());
            Ok(())
        }

        async fn update(&self, site: &Site) -> Result<(), StoreError> {
            let mut sites = self.sites.lock().unwrap();
            if !sites.contains_key(&site.id) {
                return Err(StoreError::NotFound(site.id.clone()));
            }
            sites.insert(site.id.clone(), site.clone());
            Ok(())
        }

        async fn remove(&self, id: &str) -> Result<Site, StoreError> {
            self.sites
                .lock()
                .unwrap()
                .remove(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        async fn get(&self, id: &str) -> Result<Option<Site>, StoreError> {
            Ok(self.sites.lock().unwrap().get(id).cloned())
        }

        async fn find_by_slug(&self, repository_slug: &str) -> Result<Option<Site>, StoreError> {
            Ok(self
                .sites
                .lock()
                .unwrap()
                .values()
                .find(|s| s.repository_slug == repository_slug)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<Site>, StoreError> {
            let mut sites: Vec<Site> = self.sites.lock().unwrap().values().cloned().collect();
            sites.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(sites)
        }
    }

    fn test_config() -> ProvisionerConfig {
        ProvisionerConfig {
            repo_owner: "siteforge-bot".to_string(),
            retry: RetryConfig {
                max_attempts: 3,
                initial_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(5),
                backoff_multiplier: 2.0,
            },
        }
    }

    struct Harness {
        repos: Arc<FakeRepos>,
        hosting: Arc<FakeHosting>,
        store: Arc<FakeStore>,
        provisioner: Provisioner,
    }

    fn harness() -> Harness {
        let repos = Arc::new(FakeRepos::default());
        let hosting = Arc::new(FakeHosting::default());
        let store = Arc::new(FakeStore::default());
        let provisioner = Provisioner::new(
            repos.clone(),
            hosting.clone(),
            store.clone(),
            test_config(),
        );
        Harness {
            repos,
            hosting,
            store,
            provisioner,
        }
    }

    fn request(name: &str) -> NewSite {
        NewSite {
            name: name.to_string(),
            owner_id: "owner-1".to_string(),
            contact_email: "ops@acme.example".to_string(),
            live_domain: None,
            monthly_fee: 49.0,
            notes: String::new(),
        }
    }

    fn provisioned_site(id: &str) -> Site {
        let draft = Site::new_draft(
            id,
            "Acme Corp",
            "owner-1",
            "ops@acme.example",
            "sf-client-acme-corp",
            None,
        );
        transition::apply(
            &draft,
            &Transition::Provision {
                staging_domain: "sf-client-acme-corp.pages.dev".to_string(),
                hosting_project_ref: "proj-sf-client-acme-corp".to_string(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_site_happy_path() {
        let h = harness();

        let outcome = h.provisioner.create_site(request("Acme Corp")).await.unwrap();

        assert_eq!(outcome.site.repository_slug, "sf-client-acme-corp");
        assert_eq!(outcome.site.staging_status, StagingStatus::Draft);
        assert_eq!(outcome.site.staging_domain, "sf-client-acme-corp.pages.dev");
        assert_eq!(outcome.site.hosting_project_ref, "proj-sf-client-acme-corp");
        assert!(!outcome.site.is_published);
        assert!(outcome.steps.iter().all(|s| s.success));

        assert_eq!(
            h.repos.created.lock().unwrap().as_slice(),
            ["sf-client-acme-corp"]
        );
        assert_eq!(h.repos.files.lock().unwrap().len(), 7);
        assert_eq!(
            h.hosting.projects.lock().unwrap().as_slice(),
            ["sf-client-acme-corp"]
        );

        let stored = h.store.get(&outcome.site.id).await.unwrap().unwrap();
        assert_eq!(stored.repository_slug, "sf-client-acme-corp");
    }

    #[tokio::test]
    async fn test_create_site_rejects_unusable_name() {
        let h = harness();

        let err = h.provisioner.create_site(request("!!!")).await.unwrap_err();

        assert_eq!(err.step, Step::ValidateRequest);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h.repos.created.lock().unwrap().is_empty());
        assert!(h.hosting.projects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_site_rejects_negative_fee() {
        let h = harness();
        let mut req = request("Acme Corp");
        req.monthly_fee = -5.0;

        let err = h.provisioner.create_site(req).await.unwrap_err();

        assert_eq!(err.step, Step::ValidateRequest);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h.repos.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_site_slug_conflict_aborts() {
        let h = harness();
        *h.repos.create_error.lock().unwrap() =
            Some(ProviderError::Conflict("name taken".to_string()));

        let err = h.provisioner.create_site(request("Acme Corp")).await.unwrap_err();

        assert_eq!(err.step, Step::CreateRepository);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(h.repos.files.lock().unwrap().is_empty());
        assert!(h.hosting.projects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_site_hosting_failure_leaves_repo_in_place() {
        let h = harness();
        *h.hosting.create_error.lock().unwrap() = Some(ProviderError::Api {
            status: 500,
            body: "internal error".to_string(),
        });

        let err = h.provisioner.create_site(request("Acme Corp")).await.unwrap_err();

        assert_eq!(err.step, Step::CreateHostingProject);
        assert_eq!(err.kind(), ErrorKind::Provider);
        // No compensation: the seeded repository stays, the record does not.
        assert_eq!(h.repos.created.lock().unwrap().len(), 1);
        assert_eq!(h.repos.files.lock().unwrap().len(), 7);
        assert!(h.store.list().await.unwrap().is_empty());
        // Completed steps precede the failed one in the report.
        let names: Vec<Step> = err.steps.iter().map(|s| s.step).collect();
        assert_eq!(
            names,
            [
                Step::ValidateRequest,
                Step::CreateRepository,
                Step::SeedTemplate,
                Step::CreateHostingProject,
            ]
        );
    }

    #[tokio::test]
    async fn test_create_site_probes_after_ambiguous_creation_failure() {
        let h = harness();
        *h.repos.create_error.lock().unwrap() =
            Some(ProviderError::Transport("timeout".to_string()));
        h.repos.exists.store(true, Ordering::SeqCst);

        let outcome = h.provisioner.create_site(request("Acme Corp")).await.unwrap();

        // The ambiguous call actually landed, so provisioning continued.
        assert_eq!(outcome.site.staging_status, StagingStatus::Draft);
        assert_eq!(h.repos.files.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_create_site_ambiguous_failure_without_repo_surfaces() {
        let h = harness();
        *h.repos.create_error.lock().unwrap() =
            Some(ProviderError::Transport("timeout".to_string()));

        let err = h.provisioner.create_site(request("Acme Corp")).await.unwrap_err();

        assert_eq!(err.step, Step::CreateRepository);
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(h.repos.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_site_retries_transient_seed_failure() {
        let h = harness();
        h.repos.put_failures_remaining.store(1, Ordering::SeqCst);

        let outcome = h.provisioner.create_site(request("Acme Corp")).await.unwrap();

        assert!(outcome.steps.iter().all(|s| s.success));
        assert_eq!(h.repos.files.lock().unwrap().len(), 7);
        // 7 files plus one retried attempt.
        assert_eq!(h.repos.put_attempts.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_create_site_duplicate_slug_record_conflict() {
        let h = harness();
        h.store.insert(&provisioned_site("existing")).await.unwrap();

        let err = h.provisioner.create_site(request("Acme Corp")).await.unwrap_err();

        assert_eq!(err.step, Step::PersistRecord);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(h.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_to_staging_promotes_provisioned_site() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let outcome = h.provisioner.publish_to_staging("s-1").await.unwrap();

        assert_eq!(outcome.site.staging_status, StagingStatus::Preview);
        // Already provisioned: no second hosting project.
        assert!(h.hosting.projects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_to_staging_provisions_missing_project() {
        let h = harness();
        let bare = Site::new_draft(
            "s-1",
            "Acme Corp",
            "owner-1",
            "ops@acme.example",
            "sf-client-acme-corp",
            None,
        );
        h.store.insert(&bare).await.unwrap();

        let outcome = h.provisioner.publish_to_staging("s-1").await.unwrap();

        assert_eq!(outcome.site.staging_status, StagingStatus::Preview);
        assert_eq!(outcome.site.staging_domain, "sf-client-acme-corp.pages.dev");
        assert_eq!(
            h.hosting.projects.lock().unwrap().as_slice(),
            ["sf-client-acme-corp"]
        );
    }

    #[tokio::test]
    async fn test_publish_to_staging_missing_record() {
        let h = harness();

        let err = h.provisioner.publish_to_staging("nope").await.unwrap_err();

        assert_eq!(err.step, Step::LoadRecord);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_publish_to_live_requires_domain() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let err = h.provisioner.publish_to_live("s-1", None).await.unwrap_err();

        assert_eq!(err.step, Step::ApplyTransition);
        assert_eq!(err.kind(), ErrorKind::Validation);
        // The precondition failed before any remote call.
        assert!(h.hosting.domains.lock().unwrap().is_empty());
        let stored = h.store.get("s-1").await.unwrap().unwrap();
        assert!(!stored.is_published);
    }

    #[tokio::test]
    async fn test_publish_to_live_attaches_domain_and_persists() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let outcome = h
            .provisioner
            .publish_to_live("s-1", Some("acme.example".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.site.staging_status, StagingStatus::Live);
        assert!(outcome.site.is_published);
        assert_eq!(outcome.site.live_domain.as_deref(), Some("acme.example"));
        assert_eq!(
            h.hosting.domains.lock().unwrap().as_slice(),
            [(
                "sf-client-acme-corp".to_string(),
                "acme.example".to_string()
            )]
        );
        let stored = h.store.get("s-1").await.unwrap().unwrap();
        assert!(stored.is_published);
    }

    #[tokio::test]
    async fn test_publish_to_live_attach_failure_not_persisted() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();
        *h.hosting.attach_error.lock().unwrap() =
            Some(ProviderError::Conflict("domain attached elsewhere".to_string()));

        let err = h
            .provisioner
            .publish_to_live("s-1", Some("acme.example".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.step, Step::AttachDomain);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let stored = h.store.get("s-1").await.unwrap().unwrap();
        assert!(!stored.is_published);
        assert!(stored.live_domain.is_none());
    }

    #[tokio::test]
    async fn test_unpublish_records_reason_without_remote_calls() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();
        h.provisioner
            .publish_to_live("s-1", Some("acme.example".to_string()))
            .await
            .unwrap();

        let outcome = h
            .provisioner
            .unpublish("s-1", "payment lapsed")
            .await
            .unwrap();

        assert!(!outcome.site.is_published);
        assert_eq!(
            outcome.site.unpublished_reason.as_deref(),
            Some("payment lapsed")
        );
        // Hosting project and domain binding stay untouched.
        assert!(h.hosting.deleted.lock().unwrap().is_empty());
        assert_eq!(h.hosting.domains.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unpublish_requires_reason() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let err = h.provisioner.unpublish("s-1", "  ").await.unwrap_err();

        assert_eq!(err.step, Step::ApplyTransition);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_site_record_only_by_default() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let report = h
            .provisioner
            .delete_site("s-1", DeleteOptions::default())
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.removed.id, "s-1");
        assert!(h.store.list().await.unwrap().is_empty());
        assert!(h.hosting.deleted.lock().unwrap().is_empty());
        assert!(h.repos.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_site_removes_external_resources() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();

        let report = h
            .provisioner
            .delete_site(
                "s-1",
                DeleteOptions {
                    delete_repository: true,
                    delete_hosting_project: true,
                },
            )
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(
            h.hosting.deleted.lock().unwrap().as_slice(),
            ["sf-client-acme-corp"]
        );
        assert_eq!(
            h.repos.deleted.lock().unwrap().as_slice(),
            ["sf-client-acme-corp"]
        );
    }

    #[tokio::test]
    async fn test_delete_site_external_failure_still_removes_record() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();
        *h.hosting.delete_error.lock().unwrap() = Some(ProviderError::Api {
            status: 403,
            body: "forbidden".to_string(),
        });

        let report = h
            .provisioner
            .delete_site(
                "s-1",
                DeleteOptions {
                    delete_repository: true,
                    delete_hosting_project: true,
                },
            )
            .await
            .unwrap();

        assert!(!report.is_success());
        let hosting_step = report
            .steps
            .iter()
            .find(|s| s.step == Step::DeleteHostingProject)
            .unwrap();
        assert!(!hosting_step.success);
        // The other deletion and the record removal still ran.
        assert_eq!(h.repos.deleted.lock().unwrap().len(), 1);
        assert!(h.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_site_treats_not_found_as_success() {
        let h = harness();
        h.store.insert(&provisioned_site("s-1")).await.unwrap();
        *h.hosting.delete_error.lock().unwrap() =
            Some(ProviderError::NotFound("no such project".to_string()));

        let report = h
            .provisioner
            .delete_site(
                "s-1",
                DeleteOptions {
                    delete_repository: false,
                    delete_hosting_project: true,
                },
            )
            .await
            .unwrap();

        assert!(report.is_success());
        assert!(h.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_site() {
        let h = harness();

        let err = h
            .provisioner
            .delete_site("nope", DeleteOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.step, Step::LoadRecord);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
