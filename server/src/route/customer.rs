use application::service::{
    CreateCustomerService, DeleteCustomerService, GetCustomerService, UpdateCustomerService,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use error_stack::Report;
use kernel::KernelError;
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    CreateCustomerRequest, CustomerTransformer, DeleteCustomerRequest, GetCustomerRequest,
    UpdateCustomerRequest,
};
use crate::response::CustomerPresenter;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl<D: Database> CustomerRouter for Router<AppModule<D>> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), CustomerPresenter)
                    .bypass(|| module.database().get_all_customers())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 Json(req): Json<CreateCustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_customer(dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake(GetCustomerRequest::new(id))
                        .handle(|dto| async move { module.database().get_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| {
                            ErrorStatus::from(Report::new(KernelError::not_found("Customer", id)))
                        })
                },
            )
            .put(
                |State(module): State<AppModule<D>>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateCustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.database().update_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake(DeleteCustomerRequest::new(id))
                        .handle(|dto| async move { module.database().delete_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
